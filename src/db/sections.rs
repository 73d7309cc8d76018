use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{is_unique_violation, Iden, ResourceError};
use crate::models::{BusinessLine, Section, SectionCreate, SectionUpdate};

fn map_slug_conflict(err: sqlx::Error, slug: Option<&str>) -> ResourceError {
    match slug {
        Some(slug) if is_unique_violation(&err) => ResourceError::AlreadyExists {
            kind: "Section",
            iden: Iden::Slug(slug.to_string()),
        },
        _ => ResourceError::Database(err),
    }
}

pub async fn create_section(
    pool: &PgPool,
    data: &SectionCreate,
) -> Result<Section, ResourceError> {
    sqlx::query_as::<_, Section>(
        r#"
        INSERT INTO sections (business_line, slug, title, body, images, position)
        VALUES (
            $1, $2, $3, $4, $5,
            COALESCE($6, (SELECT MAX(position) + 1 FROM sections), 0)
        )
        RETURNING *
        "#,
    )
    .bind(data.business_line.as_str())
    .bind(&data.slug)
    .bind(&data.title)
    .bind(&data.body)
    .bind(&data.images)
    .bind(data.position)
    .fetch_one(pool)
    .await
    .map_err(|e| map_slug_conflict(e, Some(&data.slug)))
}

pub async fn list_sections(
    pool: &PgPool,
    line: Option<BusinessLine>,
) -> Result<Vec<Section>, sqlx::Error> {
    sqlx::query_as::<_, Section>(
        r#"
        SELECT *
        FROM sections
        WHERE ($1::text IS NULL OR business_line = $1)
        ORDER BY position ASC, created_at ASC
        "#,
    )
    .bind(line.map(|l| l.as_str()))
    .fetch_all(pool)
    .await
}

pub async fn get_section_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Section>, sqlx::Error> {
    sqlx::query_as::<_, Section>(r#"SELECT * FROM sections WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_section_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<Section>, sqlx::Error> {
    sqlx::query_as::<_, Section>(r#"SELECT * FROM sections WHERE slug = $1"#)
        .bind(slug)
        .fetch_optional(pool)
        .await
}

pub async fn update_section(
    pool: &PgPool,
    id: Uuid,
    data: &SectionUpdate,
) -> Result<Option<Section>, ResourceError> {
    sqlx::query_as::<_, Section>(
        r#"
        UPDATE sections
        SET
            business_line = COALESCE($1, business_line),
            slug = COALESCE($2, slug),
            title = COALESCE($3, title),
            body = COALESCE($4, body),
            images = COALESCE($5, images),
            position = COALESCE($6, position),
            edited_at = now()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(data.business_line.map(|l| l.as_str()))
    .bind(data.slug.as_deref())
    .bind(data.title.as_deref())
    .bind(data.body.as_deref())
    .bind(data.images.as_deref())
    .bind(data.position)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| map_slug_conflict(e, data.slug.as_deref()))
}

pub async fn delete_section(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM sections WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

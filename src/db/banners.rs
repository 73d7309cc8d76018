use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Banner, BannerCreate, BannerUpdate, BusinessLine};

pub async fn create_banner(
    pool: &PgPool,
    data: &BannerCreate,
) -> Result<Banner, sqlx::Error> {
    sqlx::query_as::<_, Banner>(
        r#"
        INSERT INTO banners
            (business_line, title, subtitle, image_url,
             cta_label, cta_url, active, position)
        VALUES (
            $1, $2, $3, $4, $5, $6, $7,
            COALESCE($8, (SELECT MAX(position) + 1 FROM banners), 0)
        )
        RETURNING *
        "#,
    )
    .bind(data.business_line.as_str())
    .bind(&data.title)
    .bind(&data.subtitle)
    .bind(&data.image_url)
    .bind(data.cta_label.as_deref())
    .bind(data.cta_url.as_deref())
    .bind(data.active)
    .bind(data.position)
    .fetch_one(pool)
    .await
}

pub async fn list_banners(
    pool: &PgPool,
    line: Option<BusinessLine>,
    active_only: bool,
) -> Result<Vec<Banner>, sqlx::Error> {
    sqlx::query_as::<_, Banner>(
        r#"
        SELECT *
        FROM banners
        WHERE ($1::text IS NULL OR business_line = $1)
          AND (NOT $2 OR active)
        ORDER BY position ASC, created_at ASC
        "#,
    )
    .bind(line.map(|l| l.as_str()))
    .bind(active_only)
    .fetch_all(pool)
    .await
}

pub async fn get_banner_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Banner>, sqlx::Error> {
    sqlx::query_as::<_, Banner>(r#"SELECT * FROM banners WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_banner(
    pool: &PgPool,
    id: Uuid,
    data: &BannerUpdate,
) -> Result<Option<Banner>, sqlx::Error> {
    sqlx::query_as::<_, Banner>(
        r#"
        UPDATE banners
        SET
            business_line = COALESCE($1, business_line),
            title = COALESCE($2, title),
            subtitle = COALESCE($3, subtitle),
            image_url = COALESCE($4, image_url),
            cta_label = CASE WHEN $5::text IS NULL THEN cta_label ELSE NULLIF($5, '') END,
            cta_url = CASE WHEN $6::text IS NULL THEN cta_url ELSE NULLIF($6, '') END,
            active = COALESCE($7, active),
            position = COALESCE($8, position),
            edited_at = now()
        WHERE id = $9
        RETURNING *
        "#,
    )
    .bind(data.business_line.map(|l| l.as_str()))
    .bind(data.title.as_deref())
    .bind(data.subtitle.as_deref())
    .bind(data.image_url.as_deref())
    .bind(data.cta_label.as_deref())
    .bind(data.cta_url.as_deref())
    .bind(data.active)
    .bind(data.position)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_banner(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM banners WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{BusinessLine, Review, ReviewCreate, ReviewUpdate};

pub async fn create_review(
    pool: &PgPool,
    data: &ReviewCreate,
) -> Result<Review, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (business_line, author, rating, body, avatar_url, published)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(data.business_line.as_str())
    .bind(&data.author)
    .bind(data.rating)
    .bind(&data.body)
    .bind(data.avatar_url.as_deref())
    .bind(data.published)
    .fetch_one(pool)
    .await
}

/// Newest first.
pub async fn list_reviews(
    pool: &PgPool,
    line: Option<BusinessLine>,
    published_only: bool,
) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        r#"
        SELECT *
        FROM reviews
        WHERE ($1::text IS NULL OR business_line = $1)
          AND (NOT $2 OR published)
        ORDER BY created_at DESC
        "#,
    )
    .bind(line.map(|l| l.as_str()))
    .bind(published_only)
    .fetch_all(pool)
    .await
}

pub async fn get_review_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(r#"SELECT * FROM reviews WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_review(
    pool: &PgPool,
    id: Uuid,
    data: &ReviewUpdate,
) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        r#"
        UPDATE reviews
        SET
            business_line = COALESCE($1, business_line),
            author = COALESCE($2, author),
            rating = COALESCE($3, rating),
            body = COALESCE($4, body),
            avatar_url = CASE WHEN $5::text IS NULL
                THEN avatar_url ELSE NULLIF($5, '') END,
            published = COALESCE($6, published),
            edited_at = now()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(data.business_line.map(|l| l.as_str()))
    .bind(data.author.as_deref())
    .bind(data.rating)
    .bind(data.body.as_deref())
    .bind(data.avatar_url.as_deref())
    .bind(data.published)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_review(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM reviews WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

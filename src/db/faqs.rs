use sqlx::PgPool;
use uuid::Uuid;

use super::like_pattern;
use crate::models::{BusinessLine, Faq, FaqCreate, FaqUpdate};

pub async fn create_faq(pool: &PgPool, data: &FaqCreate) -> Result<Faq, sqlx::Error> {
    sqlx::query_as::<_, Faq>(
        r#"
        INSERT INTO faqs (business_line, question, answer, position)
        VALUES ($1, $2, $3, COALESCE($4, (SELECT MAX(position) + 1 FROM faqs), 0))
        RETURNING *
        "#,
    )
    .bind(data.business_line.as_str())
    .bind(&data.question)
    .bind(&data.answer)
    .bind(data.position)
    .fetch_one(pool)
    .await
}

/// FAQs of a line, optionally narrowed to those whose question or answer
/// contains `query` (case-insensitive).
pub async fn list_faqs(
    pool: &PgPool,
    line: Option<BusinessLine>,
    query: Option<&str>,
) -> Result<Vec<Faq>, sqlx::Error> {
    let pattern = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(like_pattern);

    sqlx::query_as::<_, Faq>(
        r#"
        SELECT *
        FROM faqs
        WHERE ($1::text IS NULL OR business_line = $1)
          AND ($2::text IS NULL OR question ILIKE $2 OR answer ILIKE $2)
        ORDER BY position ASC, created_at ASC
        "#,
    )
    .bind(line.map(|l| l.as_str()))
    .bind(pattern)
    .fetch_all(pool)
    .await
}

pub async fn get_faq_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Faq>, sqlx::Error> {
    sqlx::query_as::<_, Faq>(r#"SELECT * FROM faqs WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_faq(
    pool: &PgPool,
    id: Uuid,
    data: &FaqUpdate,
) -> Result<Option<Faq>, sqlx::Error> {
    sqlx::query_as::<_, Faq>(
        r#"
        UPDATE faqs
        SET
            business_line = COALESCE($1, business_line),
            question = COALESCE($2, question),
            answer = COALESCE($3, answer),
            position = COALESCE($4, position),
            edited_at = now()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(data.business_line.map(|l| l.as_str()))
    .bind(data.question.as_deref())
    .bind(data.answer.as_deref())
    .bind(data.position)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_faq(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM faqs WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{FormMessage, FormMessageCreate};
use crate::services::pagination::{Page, Paginated};

pub async fn create_message(
    pool: &PgPool,
    data: &FormMessageCreate,
) -> Result<FormMessage, sqlx::Error> {
    sqlx::query_as::<_, FormMessage>(
        r#"
        INSERT INTO form_messages (name, email, phone, business_line, subject, message)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(data.phone.as_deref())
    .bind(data.business_line.as_str())
    .bind(data.subject.as_deref())
    .bind(&data.message)
    .fetch_one(pool)
    .await
}

/// Newest first, optionally only the unread ones.
pub async fn list_messages(
    pool: &PgPool,
    page: Page,
    unread_only: bool,
) -> Result<Paginated<FormMessage>, sqlx::Error> {
    let total: i64 = sqlx::query_scalar(
        r#"SELECT COUNT(*) FROM form_messages WHERE (NOT $1 OR NOT read)"#,
    )
    .bind(unread_only)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, FormMessage>(
        r#"
        SELECT *
        FROM form_messages
        WHERE (NOT $1 OR NOT read)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(unread_only)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok(Paginated::new(items, page, total))
}

pub async fn count_unread_messages(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM form_messages WHERE NOT read"#)
        .fetch_one(pool)
        .await
}

pub async fn mark_message_read(
    pool: &PgPool,
    id: Uuid,
    read: bool,
) -> Result<Option<FormMessage>, sqlx::Error> {
    sqlx::query_as::<_, FormMessage>(
        r#"
        UPDATE form_messages
        SET read = $1
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(read)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_message(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM form_messages WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

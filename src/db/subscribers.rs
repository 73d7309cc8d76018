use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{Iden, ResourceError};
use crate::models::{Subscriber, SubscriberCreate};
use crate::services::pagination::{Page, Paginated};

pub async fn add_subscriber(
    pool: &PgPool,
    data: &SubscriberCreate,
) -> Result<Subscriber, ResourceError> {
    let subscriber = sqlx::query_as::<_, Subscriber>(
        r#"
        INSERT INTO subscribers (email) VALUES ($1)
        ON CONFLICT (email) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(&data.email)
    .fetch_optional(pool)
    .await?;

    match subscriber {
        Some(s) => Ok(s),
        None => Err(ResourceError::AlreadyExists {
            kind: "Subscriber",
            iden: Iden::Email(data.email.clone()),
        }),
    }
}

/// Newest first.
pub async fn list_subscribers(
    pool: &PgPool,
    page: Page,
) -> Result<Paginated<Subscriber>, sqlx::Error> {
    let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM subscribers"#)
        .fetch_one(pool)
        .await?;

    let items = sqlx::query_as::<_, Subscriber>(
        r#"
        SELECT *
        FROM subscribers
        ORDER BY created_at DESC, email ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok(Paginated::new(items, page, total))
}

pub async fn delete_subscriber(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM subscribers WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

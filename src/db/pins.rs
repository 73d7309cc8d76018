use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::DownloadPin;

/// Issues a PIN for `email`, retiring any PIN still outstanding for it.
pub async fn replace_pin(
    pool: &PgPool,
    email: &str,
    pin_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<DownloadPin, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"DELETE FROM download_pins WHERE email = $1 AND consumed_at IS NULL"#,
    )
    .bind(email)
    .execute(&mut *tx)
    .await?;

    let pin = sqlx::query_as::<_, DownloadPin>(
        r#"
        INSERT INTO download_pins (email, pin_hash, expires_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(pin_hash)
    .bind(expires_at)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(pin)
}

/// Most recent unconsumed PIN for `email`, expired or not.
pub async fn get_live_pin(
    pool: &PgPool,
    email: &str,
) -> Result<Option<DownloadPin>, sqlx::Error> {
    sqlx::query_as::<_, DownloadPin>(
        r#"
        SELECT *
        FROM download_pins
        WHERE email = $1 AND consumed_at IS NULL
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Spends one attempt on a live PIN and returns the new total. `None` when
/// the PIN is used up, expired or already consumed. The check and the
/// increment are one statement, so concurrent guesses cannot overrun `max`.
pub async fn claim_pin_attempt(
    pool: &PgPool,
    id: Uuid,
    max: i32,
) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        UPDATE download_pins
        SET attempts = attempts + 1
        WHERE id = $1
          AND consumed_at IS NULL
          AND expires_at > now()
          AND attempts < $2
        RETURNING attempts
        "#,
    )
    .bind(id)
    .bind(max)
    .fetch_optional(pool)
    .await
}

/// Marks the PIN used. `false` if another request consumed it first.
pub async fn consume_pin(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE download_pins
        SET consumed_at = now()
        WHERE id = $1 AND consumed_at IS NULL
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

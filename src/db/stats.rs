use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{BusinessLine, Stat, StatCreate, StatUpdate};

pub async fn create_stat(pool: &PgPool, data: &StatCreate) -> Result<Stat, sqlx::Error> {
    sqlx::query_as::<_, Stat>(
        r#"
        INSERT INTO stats (business_line, label, value, suffix, position)
        VALUES ($1, $2, $3, $4, COALESCE($5, (SELECT MAX(position) + 1 FROM stats), 0))
        RETURNING *
        "#,
    )
    .bind(data.business_line.as_str())
    .bind(&data.label)
    .bind(data.value)
    .bind(&data.suffix)
    .bind(data.position)
    .fetch_one(pool)
    .await
}

pub async fn list_stats(
    pool: &PgPool,
    line: Option<BusinessLine>,
) -> Result<Vec<Stat>, sqlx::Error> {
    sqlx::query_as::<_, Stat>(
        r#"
        SELECT *
        FROM stats
        WHERE ($1::text IS NULL OR business_line = $1)
        ORDER BY position ASC, created_at ASC
        "#,
    )
    .bind(line.map(|l| l.as_str()))
    .fetch_all(pool)
    .await
}

pub async fn get_stat_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Stat>, sqlx::Error> {
    sqlx::query_as::<_, Stat>(r#"SELECT * FROM stats WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_stat(
    pool: &PgPool,
    id: Uuid,
    data: &StatUpdate,
) -> Result<Option<Stat>, sqlx::Error> {
    sqlx::query_as::<_, Stat>(
        r#"
        UPDATE stats
        SET
            business_line = COALESCE($1, business_line),
            label = COALESCE($2, label),
            value = COALESCE($3, value),
            suffix = COALESCE($4, suffix),
            position = COALESCE($5, position),
            edited_at = now()
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(data.business_line.map(|l| l.as_str()))
    .bind(data.label.as_deref())
    .bind(data.value)
    .bind(data.suffix.as_deref())
    .bind(data.position)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_stat(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM stats WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

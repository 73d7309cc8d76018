use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::ResourceError;
use crate::models::{BusinessLine, Video, VideoCreate, VideoUpdate};

pub async fn create_video(
    pool: &PgPool,
    data: &VideoCreate,
) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        INSERT INTO videos (business_line, title, url, position)
        VALUES ($1, $2, $3, COALESCE($4, (SELECT MAX(position) + 1 FROM videos), 0))
        RETURNING *
        "#,
    )
    .bind(data.business_line.as_str())
    .bind(&data.title)
    .bind(&data.url)
    .bind(data.position)
    .fetch_one(pool)
    .await
}

pub async fn list_videos(
    pool: &PgPool,
    line: Option<BusinessLine>,
) -> Result<Vec<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        SELECT *
        FROM videos
        WHERE ($1::text IS NULL OR business_line = $1)
        ORDER BY position ASC, created_at ASC
        "#,
    )
    .bind(line.map(|l| l.as_str()))
    .fetch_all(pool)
    .await
}

pub async fn get_video_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(r#"SELECT * FROM videos WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_video(
    pool: &PgPool,
    id: Uuid,
    data: &VideoUpdate,
) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        UPDATE videos
        SET
            business_line = COALESCE($1, business_line),
            title = COALESCE($2, title),
            url = COALESCE($3, url),
            position = COALESCE($4, position),
            edited_at = now()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(data.business_line.map(|l| l.as_str()))
    .bind(data.title.as_deref())
    .bind(data.url.as_deref())
    .bind(data.position)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_video(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM videos WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Rewrites every video's position from `ids` (index = position) in one
/// transaction. `ids` must name each existing video exactly once; otherwise
/// nothing changes.
pub async fn reorder_videos(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<Video>, ResourceError> {
    let mut tx = pool.begin().await?;

    let existing: Vec<Uuid> = sqlx::query_scalar(r#"SELECT id FROM videos FOR UPDATE"#)
        .fetch_all(&mut *tx)
        .await?;
    let existing: HashSet<Uuid> = existing.into_iter().collect();

    if let Some(unknown) = ids.iter().find(|id| !existing.contains(*id)) {
        tx.rollback().await?;
        return Err(ResourceError::not_found("Video", *unknown));
    }

    let requested: HashSet<&Uuid> = ids.iter().collect();
    if requested.len() != ids.len() || requested.len() != existing.len() {
        tx.rollback().await?;
        return Err(ResourceError::invalid(
            "The order must list every video exactly once",
        ));
    }

    sqlx::query(
        r#"
        UPDATE videos AS v
        SET position = (o.ord - 1)::integer, edited_at = now()
        FROM UNNEST($1::uuid[]) WITH ORDINALITY AS o(id, ord)
        WHERE v.id = o.id
        "#,
    )
    .bind(ids)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(list_videos(pool, None).await?)
}

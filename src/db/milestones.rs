use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Milestone, MilestoneCreate, MilestoneUpdate};

pub async fn create_milestone(
    pool: &PgPool,
    data: &MilestoneCreate,
) -> Result<Milestone, sqlx::Error> {
    sqlx::query_as::<_, Milestone>(
        r#"
        INSERT INTO milestones (year, title, description, position)
        VALUES (
            $1, $2, $3,
            COALESCE($4, (SELECT MAX(position) + 1 FROM milestones), 0)
        )
        RETURNING *
        "#,
    )
    .bind(data.year)
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.position)
    .fetch_one(pool)
    .await
}

/// Manual order as arranged in the admin panel.
pub async fn list_milestones(pool: &PgPool) -> Result<Vec<Milestone>, sqlx::Error> {
    sqlx::query_as::<_, Milestone>(
        r#"
        SELECT *
        FROM milestones
        ORDER BY position ASC, created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_milestone_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Milestone>, sqlx::Error> {
    sqlx::query_as::<_, Milestone>(r#"SELECT * FROM milestones WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_milestone(
    pool: &PgPool,
    id: Uuid,
    data: &MilestoneUpdate,
) -> Result<Option<Milestone>, sqlx::Error> {
    sqlx::query_as::<_, Milestone>(
        r#"
        UPDATE milestones
        SET
            year = COALESCE($1, year),
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            position = COALESCE($4, position),
            edited_at = now()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(data.year)
    .bind(data.title.as_deref())
    .bind(data.description.as_deref())
    .bind(data.position)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_milestone(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM milestones WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

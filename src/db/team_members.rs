use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{BusinessLine, TeamMember, TeamMemberCreate, TeamMemberUpdate};

pub async fn create_team_member(
    pool: &PgPool,
    data: &TeamMemberCreate,
) -> Result<TeamMember, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>(
        r#"
        INSERT INTO team_members (business_line, name, role, bio, photo_url, position)
        VALUES (
            $1, $2, $3, $4, $5,
            COALESCE($6, (SELECT MAX(position) + 1 FROM team_members), 0)
        )
        RETURNING *
        "#,
    )
    .bind(data.business_line.as_str())
    .bind(&data.name)
    .bind(&data.role)
    .bind(&data.bio)
    .bind(data.photo_url.as_deref())
    .bind(data.position)
    .fetch_one(pool)
    .await
}

pub async fn list_team_members(
    pool: &PgPool,
    line: Option<BusinessLine>,
) -> Result<Vec<TeamMember>, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>(
        r#"
        SELECT *
        FROM team_members
        WHERE ($1::text IS NULL OR business_line = $1)
        ORDER BY position ASC, created_at ASC
        "#,
    )
    .bind(line.map(|l| l.as_str()))
    .fetch_all(pool)
    .await
}

pub async fn get_team_member_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<TeamMember>, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>(r#"SELECT * FROM team_members WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_team_member(
    pool: &PgPool,
    id: Uuid,
    data: &TeamMemberUpdate,
) -> Result<Option<TeamMember>, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>(
        r#"
        UPDATE team_members
        SET
            business_line = COALESCE($1, business_line),
            name = COALESCE($2, name),
            role = COALESCE($3, role),
            bio = COALESCE($4, bio),
            photo_url = CASE WHEN $5::text IS NULL THEN photo_url ELSE NULLIF($5, '') END,
            position = COALESCE($6, position),
            edited_at = now()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(data.business_line.map(|l| l.as_str()))
    .bind(data.name.as_deref())
    .bind(data.role.as_deref())
    .bind(data.bio.as_deref())
    .bind(data.photo_url.as_deref())
    .bind(data.position)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_team_member(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM team_members WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{Iden, ResourceError};
use crate::models::{AdminCreate, AdminSession, AdminUser};

pub async fn create_admin(
    pool: &PgPool,
    data: &AdminCreate,
) -> Result<AdminUser, ResourceError> {
    let admin = sqlx::query_as::<_, AdminUser>(
        r#"
        INSERT INTO admin_users (email, password_hash) VALUES ($1, $2)
        ON CONFLICT (email) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(&data.email)
    .bind(&data.password_hash)
    .fetch_optional(pool)
    .await?;

    match admin {
        Some(a) => Ok(a),
        None => Err(ResourceError::AlreadyExists {
            kind: "Admin",
            iden: Iden::Email(data.email.clone()),
        }),
    }
}

pub async fn get_admin_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<AdminUser>, sqlx::Error> {
    sqlx::query_as::<_, AdminUser>(r#"SELECT * FROM admin_users WHERE email = $1"#)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn count_admins(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM admin_users"#)
        .fetch_one(pool)
        .await
}

pub async fn create_session(
    pool: &PgPool,
    admin_id: Uuid,
    ttl: Duration,
) -> Result<AdminSession, sqlx::Error> {
    sqlx::query_as::<_, AdminSession>(
        r#"
        INSERT INTO admin_sessions (token, admin_id, expires_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(admin_id)
    .bind(Utc::now() + ttl)
    .fetch_one(pool)
    .await
}

/// Admin owning a live (unexpired) session.
pub async fn get_admin_by_session(
    pool: &PgPool,
    token: Uuid,
) -> Result<Option<AdminUser>, sqlx::Error> {
    sqlx::query_as::<_, AdminUser>(
        r#"
        SELECT a.*
        FROM admin_sessions s
        JOIN admin_users a ON a.id = s.admin_id
        WHERE s.token = $1 AND s.expires_at > now()
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

pub async fn delete_session(pool: &PgPool, token: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM admin_sessions WHERE token = $1"#)
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn purge_expired_sessions(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM admin_sessions WHERE expires_at <= now()"#)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

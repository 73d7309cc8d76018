use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{is_check_violation, ResourceError};
use crate::models::{BusinessLine, ContactInfo, ContactInfoCreate, ContactInfoUpdate};

fn map_unreachable(err: sqlx::Error) -> ResourceError {
    if is_check_violation(&err) {
        ResourceError::invalid("At least one of 'phone' or 'email' is required")
    } else {
        ResourceError::Database(err)
    }
}

pub async fn create_contact(
    pool: &PgPool,
    data: &ContactInfoCreate,
) -> Result<ContactInfo, ResourceError> {
    sqlx::query_as::<_, ContactInfo>(
        r#"
        INSERT INTO contacts
            (business_line, label, phone, email, address, map_url, whatsapp)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(data.business_line.as_str())
    .bind(&data.label)
    .bind(data.phone.as_deref())
    .bind(data.email.as_deref())
    .bind(data.address.as_deref())
    .bind(data.map_url.as_deref())
    .bind(data.whatsapp.as_deref())
    .fetch_one(pool)
    .await
    .map_err(map_unreachable)
}

pub async fn list_contacts(
    pool: &PgPool,
    line: Option<BusinessLine>,
) -> Result<Vec<ContactInfo>, sqlx::Error> {
    sqlx::query_as::<_, ContactInfo>(
        r#"
        SELECT *
        FROM contacts
        WHERE ($1::text IS NULL OR business_line = $1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(line.map(|l| l.as_str()))
    .fetch_all(pool)
    .await
}

pub async fn get_contact_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ContactInfo>, sqlx::Error> {
    sqlx::query_as::<_, ContactInfo>(r#"SELECT * FROM contacts WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Optional columns are cleared by an empty string. Clearing both phone and
/// email is refused by the table's check constraint.
pub async fn update_contact(
    pool: &PgPool,
    id: Uuid,
    data: &ContactInfoUpdate,
) -> Result<Option<ContactInfo>, ResourceError> {
    sqlx::query_as::<_, ContactInfo>(
        r#"
        UPDATE contacts
        SET
            business_line = COALESCE($1, business_line),
            label = COALESCE($2, label),
            phone = CASE WHEN $3::text IS NULL
                THEN phone ELSE NULLIF($3, '') END,
            email = CASE WHEN $4::text IS NULL
                THEN email ELSE NULLIF($4, '') END,
            address = CASE WHEN $5::text IS NULL
                THEN address ELSE NULLIF($5, '') END,
            map_url = CASE WHEN $6::text IS NULL
                THEN map_url ELSE NULLIF($6, '') END,
            whatsapp = CASE WHEN $7::text IS NULL
                THEN whatsapp ELSE NULLIF($7, '') END,
            edited_at = now()
        WHERE id = $8
        RETURNING *
        "#,
    )
    .bind(data.business_line.map(|l| l.as_str()))
    .bind(data.label.as_deref())
    .bind(data.phone.as_deref())
    .bind(data.email.as_deref())
    .bind(data.address.as_deref())
    .bind(data.map_url.as_deref())
    .bind(data.whatsapp.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(map_unreachable)
}

pub async fn delete_contact(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM contacts WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

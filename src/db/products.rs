use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{BusinessLine, Product, ProductCreate, ProductUpdate};

pub async fn create_product(
    pool: &PgPool,
    data: &ProductCreate,
) -> Result<Product, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products
            (business_line, name, description, price_label, image_url, features, position)
        VALUES (
            $1, $2, $3, $4, $5, $6,
            COALESCE($7, (SELECT MAX(position) + 1 FROM products), 0)
        )
        RETURNING *
        "#,
    )
    .bind(data.business_line.as_str())
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price_label.as_deref())
    .bind(data.image_url.as_deref())
    .bind(&data.features)
    .bind(data.position)
    .fetch_one(pool)
    .await
}

pub async fn list_products(
    pool: &PgPool,
    line: Option<BusinessLine>,
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        r#"
        SELECT *
        FROM products
        WHERE ($1::text IS NULL OR business_line = $1)
        ORDER BY position ASC, created_at ASC
        "#,
    )
    .bind(line.map(|l| l.as_str()))
    .fetch_all(pool)
    .await
}

pub async fn get_product_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(r#"SELECT * FROM products WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_product(
    pool: &PgPool,
    id: Uuid,
    data: &ProductUpdate,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET
            business_line = COALESCE($1, business_line),
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            price_label = CASE WHEN $4::text IS NULL
                THEN price_label ELSE NULLIF($4, '') END,
            image_url = CASE WHEN $5::text IS NULL THEN image_url ELSE NULLIF($5, '') END,
            features = COALESCE($6, features),
            position = COALESCE($7, position),
            edited_at = now()
        WHERE id = $8
        RETURNING *
        "#,
    )
    .bind(data.business_line.map(|l| l.as_str()))
    .bind(data.name.as_deref())
    .bind(data.description.as_deref())
    .bind(data.price_label.as_deref())
    .bind(data.image_url.as_deref())
    .bind(data.features.as_deref())
    .bind(data.position)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_product(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM products WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

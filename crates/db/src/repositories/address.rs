use crate::models::DbAddress;
use carport_core::models::address::AddressRequest;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn create_address(
    pool: &Pool<Postgres>,
    user_id: i64,
    request: &AddressRequest,
) -> Result<DbAddress> {
    tracing::debug!("Creating address for user {}", user_id);

    let address = sqlx::query_as::<_, DbAddress>(
        r#"
        INSERT INTO addresses (user_id, title, location)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, title, location, created_at
        "#,
    )
    .bind(user_id)
    .bind(request.title.trim())
    .bind(request.location.trim())
    .fetch_one(pool)
    .await?;

    Ok(address)
}

pub async fn get_address_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbAddress>> {
    let address = sqlx::query_as::<_, DbAddress>(
        "SELECT id, user_id, title, location, created_at FROM addresses WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(address)
}

pub async fn list_addresses_by_user(pool: &Pool<Postgres>, user_id: i64) -> Result<Vec<DbAddress>> {
    let addresses = sqlx::query_as::<_, DbAddress>(
        r#"
        SELECT id, user_id, title, location, created_at
        FROM addresses
        WHERE user_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(addresses)
}

pub async fn update_address(
    pool: &Pool<Postgres>,
    id: i64,
    request: &AddressRequest,
) -> Result<Option<DbAddress>> {
    tracing::debug!("Updating address: id={}", id);

    let address = sqlx::query_as::<_, DbAddress>(
        r#"
        UPDATE addresses
        SET title = $2, location = $3
        WHERE id = $1
        RETURNING id, user_id, title, location, created_at
        "#,
    )
    .bind(id)
    .bind(request.title.trim())
    .bind(request.location.trim())
    .fetch_optional(pool)
    .await?;

    Ok(address)
}

pub async fn delete_address(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    tracing::debug!("Deleting address: id={}", id);

    let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

use crate::models::DbStnk;
use eyre::Result;
use sqlx::{Pool, Postgres};

const STNK_COLUMNS: &str = "id, user_id, photo_url, verified, description, created_at";

pub async fn create_stnk(pool: &Pool<Postgres>, user_id: i64, photo_url: &str) -> Result<DbStnk> {
    tracing::debug!("Creating STNK for user {}", user_id);

    let stnk = sqlx::query_as::<_, DbStnk>(&format!(
        "INSERT INTO stnks (user_id, photo_url) VALUES ($1, $2) RETURNING {STNK_COLUMNS}"
    ))
    .bind(user_id)
    .bind(photo_url.trim())
    .fetch_one(pool)
    .await?;

    Ok(stnk)
}

pub async fn get_stnk_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbStnk>> {
    let stnk = sqlx::query_as::<_, DbStnk>(&format!("SELECT {STNK_COLUMNS} FROM stnks WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(stnk)
}

/// Every document, or only those of `user_id`.
pub async fn list_stnks(pool: &Pool<Postgres>, user_id: Option<i64>) -> Result<Vec<DbStnk>> {
    let stnks = sqlx::query_as::<_, DbStnk>(&format!(
        r#"
        SELECT {STNK_COLUMNS}
        FROM stnks
        WHERE ($1::BIGINT IS NULL OR user_id = $1)
        ORDER BY created_at ASC, id ASC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(stnks)
}

pub async fn update_photo(pool: &Pool<Postgres>, id: i64, photo_url: &str) -> Result<Option<DbStnk>> {
    tracing::debug!("Replacing STNK photo: id={}", id);

    let stnk = sqlx::query_as::<_, DbStnk>(&format!(
        "UPDATE stnks SET photo_url = $2 WHERE id = $1 RETURNING {STNK_COLUMNS}"
    ))
    .bind(id)
    .bind(photo_url.trim())
    .fetch_optional(pool)
    .await?;

    Ok(stnk)
}

pub async fn mark_verified(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbStnk>> {
    let stnk = sqlx::query_as::<_, DbStnk>(&format!(
        "UPDATE stnks SET verified = TRUE WHERE id = $1 RETURNING {STNK_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(stnk)
}

/// Replaces the staff note. An empty `description` clears it.
pub async fn set_description(
    pool: &Pool<Postgres>,
    id: i64,
    description: &str,
) -> Result<Option<DbStnk>> {
    let stnk = sqlx::query_as::<_, DbStnk>(&format!(
        "UPDATE stnks SET description = $2 WHERE id = $1 RETURNING {STNK_COLUMNS}"
    ))
    .bind(id)
    .bind(description.trim())
    .fetch_optional(pool)
    .await?;

    Ok(stnk)
}

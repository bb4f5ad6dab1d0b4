use crate::models::DbSession;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn create_session(
    pool: &Pool<Postgres>,
    token: &str,
    user_id: i64,
    expires_at: DateTime<Utc>,
) -> Result<DbSession> {
    tracing::debug!("Creating session: user_id={}, expires_at={}", user_id, expires_at);

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions (token, user_id, expires_at)
        VALUES ($1, $2, $3)
        RETURNING token, user_id, expires_at, created_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

/// Looks up a session that has not expired at `now`.
pub async fn get_active_session(
    pool: &Pool<Postgres>,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<DbSession>> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT token, user_id, expires_at, created_at
        FROM sessions
        WHERE token = $1 AND expires_at > $2
        "#,
    )
    .bind(token)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn delete_session(pool: &Pool<Postgres>, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete_expired_sessions(pool: &Pool<Postgres>, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
        .bind(now)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        tracing::debug!("Removed {} expired sessions", result.rows_affected());
    }

    Ok(result.rows_affected())
}

use crate::models::DbAdminEmail;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn list_admin_emails(pool: &Pool<Postgres>) -> Result<Vec<DbAdminEmail>> {
    let emails = sqlx::query_as::<_, DbAdminEmail>("SELECT id, email FROM admin_emails ORDER BY email ASC")
        .fetch_all(pool)
        .await?;

    Ok(emails)
}

/// Inserts `email`, or returns `None` when it is already on the list.
pub async fn add_admin_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbAdminEmail>> {
    tracing::debug!("Adding admin email: {}", email);

    let row = sqlx::query_as::<_, DbAdminEmail>(
        r#"
        INSERT INTO admin_emails (email)
        VALUES ($1)
        ON CONFLICT (email) DO NOTHING
        RETURNING id, email
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete_admin_email(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM admin_emails WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

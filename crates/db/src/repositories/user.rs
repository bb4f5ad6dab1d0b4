use crate::models::DbUser;
use carport_core::models::user::Role;
use eyre::Result;
use sqlx::{Pool, Postgres};

const USER_COLUMNS: &str = "id, name, email, phone, password_hash, role, created_at";

pub async fn create_user(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    phone: &str,
    password_hash: &str,
    role: Role,
) -> Result<DbUser> {
    tracing::debug!("Creating user: email={}, role={}", email, role);

    let user = sqlx::query_as::<_, DbUser>(&format!(
        r#"
        INSERT INTO users (name, email, phone, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    tracing::debug!("User created successfully: id={}", user.id);
    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbUser>> {
    tracing::debug!("Getting user by id: {}", id);

    let user = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Emails are compared case-insensitively.
pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn email_exists(pool: &Pool<Postgres>, email: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
    )
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn list_users(pool: &Pool<Postgres>) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Replaces the profile fields. The password hash and role are kept when
/// `None`.
pub async fn update_user(
    pool: &Pool<Postgres>,
    id: i64,
    name: &str,
    email: &str,
    phone: &str,
    password_hash: Option<&str>,
    role: Option<Role>,
) -> Result<Option<DbUser>> {
    tracing::debug!(
        "Updating user: id={}, password_changed={}",
        id,
        password_hash.is_some()
    );

    let user = sqlx::query_as::<_, DbUser>(&format!(
        r#"
        UPDATE users
        SET name = $2,
            email = $3,
            phone = $4,
            password_hash = COALESCE($5, password_hash),
            role = COALESCE($6, role)
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(password_hash)
    .bind(role.map(|role| role.as_str()))
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn delete_user(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    tracing::debug!("Deleting user: id={}", id);

    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

use crate::models::{DbCarType, DbNamed};
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};

/// Lookup tables holding nothing but a unique name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedTable {
    Brands,
    Colors,
    Services,
    Categories,
    Tags,
}

impl NamedTable {
    pub fn table(&self) -> &'static str {
        match self {
            NamedTable::Brands => "brands",
            NamedTable::Colors => "colors",
            NamedTable::Services => "services",
            NamedTable::Categories => "categories",
            NamedTable::Tags => "tags",
        }
    }
}

pub async fn list_named(pool: &Pool<Postgres>, table: NamedTable) -> Result<Vec<DbNamed>> {
    let rows = sqlx::query_as::<_, DbNamed>(&format!(
        "SELECT id, name FROM {} ORDER BY name ASC",
        table.table()
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_named(pool: &Pool<Postgres>, table: NamedTable, id: i64) -> Result<Option<DbNamed>> {
    let row = sqlx::query_as::<_, DbNamed>(&format!(
        "SELECT id, name FROM {} WHERE id = $1",
        table.table()
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts `name`, or returns `None` when a case-insensitive match exists.
pub async fn create_named(
    pool: &Pool<Postgres>,
    table: NamedTable,
    name: &str,
) -> Result<Option<DbNamed>> {
    tracing::debug!("Creating {} entry: {}", table.table(), name);

    let row = sqlx::query_as::<_, DbNamed>(&format!(
        r#"
        INSERT INTO {table} (name)
        SELECT $1
        WHERE NOT EXISTS (SELECT 1 FROM {table} WHERE LOWER(name) = LOWER($1))
        ON CONFLICT (name) DO NOTHING
        RETURNING id, name
        "#,
        table = table.table()
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete_named(pool: &Pool<Postgres>, table: NamedTable, id: i64) -> Result<bool> {
    tracing::debug!("Deleting {} entry: id={}", table.table(), id);

    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table.table()))
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Id of the entry named `name`, creating it when missing. Callers pass
/// names already title-cased so the match is exact.
pub async fn upsert_named(conn: &mut PgConnection, table: NamedTable, name: &str) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(&format!(
        r#"
        INSERT INTO {} (name)
        VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
        table.table()
    ))
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(id)
}

pub async fn list_car_types(pool: &Pool<Postgres>, brand_id: Option<i64>) -> Result<Vec<DbCarType>> {
    let rows = sqlx::query_as::<_, DbCarType>(
        r#"
        SELECT ct.id, ct.name, ct.brand_id, b.name AS brand_name
        FROM car_types ct
        JOIN brands b ON b.id = ct.brand_id
        WHERE ($1::BIGINT IS NULL OR ct.brand_id = $1)
        ORDER BY b.name ASC, ct.name ASC
        "#,
    )
    .bind(brand_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn upsert_car_type(conn: &mut PgConnection, brand_id: i64, name: &str) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO car_types (name, brand_id)
        VALUES ($1, $2)
        ON CONFLICT (brand_id, name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(brand_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(id)
}

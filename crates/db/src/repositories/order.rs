use std::collections::HashMap;

use crate::models::{DbAppointment, DbOrder, DbOrderService};
use carport_core::models::order::Order;
use carport_core::scheduling::Appointment;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Executor, Pool, Postgres};

pub(crate) const ORDER_COLUMNS: &str = "id, user_id, car_id, service_type, address, order_time, \
     duration, price, status, created_at, updated_at";

/// Optional filters for [`list_orders`]. The time bounds are half-open.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub user_id: Option<i64>,
    pub car_id: Option<i64>,
}

pub async fn list_orders(pool: &Pool<Postgres>, filter: &OrderFilter) -> Result<Vec<Order>> {
    tracing::debug!("Listing orders: {:?}", filter);

    let rows = sqlx::query_as::<_, DbOrder>(&format!(
        r#"
        SELECT {ORDER_COLUMNS}
        FROM orders
        WHERE ($1::TIMESTAMPTZ IS NULL OR order_time >= $1)
          AND ($2::TIMESTAMPTZ IS NULL OR order_time < $2)
          AND ($3::BIGINT IS NULL OR user_id = $3)
          AND ($4::BIGINT IS NULL OR car_id = $4)
        ORDER BY order_time ASC, id ASC
        "#
    ))
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.user_id)
    .bind(filter.car_id)
    .fetch_all(pool)
    .await?;

    attach_services(pool, rows).await
}

pub async fn get_order_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<Order>> {
    let row = sqlx::query_as::<_, DbOrder>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(attach_services(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Appointments occupying a bay between `from` and `to`. Cancelled orders
/// are left out.
pub async fn list_used_slots(
    pool: &Pool<Postgres>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<Appointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, order_time, duration, status
        FROM orders
        WHERE order_time >= $1 AND order_time < $2 AND status <> 'CANCELED'
        ORDER BY order_time ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Appointment::try_from).collect()
}

/// Removes an order outright. No scheduling rules apply.
pub async fn delete_order(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    tracing::debug!("Deleting order: id={}", id);

    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Service names linked to each of `order_ids`.
pub(crate) async fn load_services<'e, E>(
    executor: E,
    order_ids: &[i64],
) -> Result<HashMap<i64, Vec<String>>>
where
    E: Executor<'e, Database = Postgres>,
{
    let rows = sqlx::query_as::<_, DbOrderService>(
        r#"
        SELECT os.order_id, s.name
        FROM order_services os
        JOIN services s ON s.id = os.service_id
        WHERE os.order_id = ANY($1)
        ORDER BY s.name ASC
        "#,
    )
    .bind(order_ids)
    .fetch_all(executor)
    .await?;

    let mut services: HashMap<i64, Vec<String>> = HashMap::new();
    for row in rows {
        services.entry(row.order_id).or_default().push(row.name);
    }
    Ok(services)
}

async fn attach_services(pool: &Pool<Postgres>, rows: Vec<DbOrder>) -> Result<Vec<Order>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut services = load_services(pool, &ids).await?;

    rows.into_iter()
        .map(|row| {
            let names = services.remove(&row.id).unwrap_or_default();
            row.into_order(names)
        })
        .collect()
}

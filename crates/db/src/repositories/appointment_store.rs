use async_trait::async_trait;
use carport_core::booking::AppointmentStore;
use carport_core::errors::{CarportError, CarportResult};
use carport_core::models::order::{NewOrder, Order, OrderStatus};
use carport_core::scheduling::Appointment;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::{Result, WrapErr};
use sqlx::{Pool, Postgres, Transaction};

use crate::models::{DbAppointment, DbOrder};
use crate::repositories::catalog::{self, NamedTable};
use crate::repositories::order::{ORDER_COLUMNS, load_services};

/// [`AppointmentStore`] over one PostgreSQL transaction.
///
/// Dropping the store without calling [`PgAppointmentStore::commit`] rolls
/// every write back, which is how rejected bookings leave no trace.
pub struct PgAppointmentStore {
    tx: Transaction<'static, Postgres>,
}

impl PgAppointmentStore {
    pub async fn begin(pool: &Pool<Postgres>) -> Result<Self> {
        let tx = pool.begin().await.wrap_err("Failed to begin order transaction")?;
        Ok(Self { tx })
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await.wrap_err("Failed to commit order transaction")?;
        Ok(())
    }

    async fn order_with_services(&mut self, row: DbOrder) -> CarportResult<Order> {
        let mut services = load_services(&mut *self.tx, &[row.id]).await?;
        let names = services.remove(&row.id).unwrap_or_default();
        Ok(row.into_order(names)?)
    }
}

/// Advisory lock key for a shop-local calendar day.
fn day_lock_key(day: NaiveDate) -> String {
    format!("carport:orders:{}", day)
}

#[async_trait]
impl AppointmentStore for PgAppointmentStore {
    async fn lock_day(&mut self, day: NaiveDate) -> CarportResult<()> {
        tracing::debug!("Locking order day {}", day);

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(day_lock_key(day))
            .execute(&mut *self.tx)
            .await
            .wrap_err_with(|| format!("Failed to lock order day {}", day))?;

        Ok(())
    }

    async fn find_vehicle_owner(&mut self, car_id: i64) -> CarportResult<Option<i64>> {
        let owner = sqlx::query_scalar::<_, i64>("SELECT user_id FROM cars WHERE id = $1")
            .bind(car_id)
            .fetch_optional(&mut *self.tx)
            .await
            .wrap_err("Failed to look up car owner")?;

        Ok(owner)
    }

    async fn appointments_between(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> CarportResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, DbAppointment>(
            r#"
            SELECT id, order_time, duration, status
            FROM orders
            WHERE order_time >= $1 AND order_time < $2
            ORDER BY order_time ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&mut *self.tx)
        .await
        .wrap_err("Failed to load appointments")?;

        let appointments = rows
            .into_iter()
            .map(Appointment::try_from)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Loaded {} appointments between {} and {}",
            appointments.len(),
            from,
            to
        );
        Ok(appointments)
    }

    async fn find_order(&mut self, id: i64) -> CarportResult<Option<Order>> {
        let row = sqlx::query_as::<_, DbOrder>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .wrap_err_with(|| format!("Failed to load order {}", id))?;

        match row {
            Some(row) => Ok(Some(self.order_with_services(row).await?)),
            None => Ok(None),
        }
    }

    async fn insert_order(&mut self, order: NewOrder) -> CarportResult<Order> {
        let duration = i32::try_from(order.duration)
            .map_err(|_| CarportError::validation("duration is too large"))?;

        let row = sqlx::query_as::<_, DbOrder>(&format!(
            r#"
            INSERT INTO orders (user_id, car_id, service_type, address, order_time, duration, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order.user_id)
        .bind(order.car_id)
        .bind(&order.service_type)
        .bind(order.address.as_deref())
        .bind(order.order_time)
        .bind(duration)
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .wrap_err("Failed to insert order")?;

        for name in &order.services {
            let service_id = catalog::upsert_named(&mut self.tx, NamedTable::Services, name).await?;

            sqlx::query(
                r#"
                INSERT INTO order_services (order_id, service_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(row.id)
            .bind(service_id)
            .execute(&mut *self.tx)
            .await
            .wrap_err("Failed to link order service")?;
        }

        self.order_with_services(row).await
    }

    async fn update_schedule(
        &mut self,
        id: i64,
        status: OrderStatus,
        duration: Option<u32>,
    ) -> CarportResult<Order> {
        let duration = duration
            .map(i32::try_from)
            .transpose()
            .map_err(|_| CarportError::validation("duration is too large"))?;

        let row = sqlx::query_as::<_, DbOrder>(&format!(
            r#"
            UPDATE orders
            SET status = $2, duration = COALESCE($3, duration), updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(duration)
        .fetch_optional(&mut *self.tx)
        .await
        .wrap_err_with(|| format!("Failed to update order {}", id))?
        .ok_or_else(|| CarportError::not_found("Order", id))?;

        self.order_with_services(row).await
    }

    async fn update_price(
        &mut self,
        id: i64,
        status: OrderStatus,
        price: u64,
    ) -> CarportResult<Order> {
        let price = i64::try_from(price).map_err(|_| CarportError::validation("price is too large"))?;

        let row = sqlx::query_as::<_, DbOrder>(&format!(
            r#"
            UPDATE orders
            SET status = $2, price = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(price)
        .fetch_optional(&mut *self.tx)
        .await
        .wrap_err_with(|| format!("Failed to update order {}", id))?
        .ok_or_else(|| CarportError::not_found("Order", id))?;

        self.order_with_services(row).await
    }
}

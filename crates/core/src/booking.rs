//! # Booking Workflow
//!
//! Runs appointment admission against persisted orders. The store is injected
//! as an [`AppointmentStore`], one instance per unit of work: the database
//! crate backs it with a PostgreSQL transaction, tests back it with memory.
//!
//! Every operation follows the same shape: serialise on the affected shop day
//! with [`AppointmentStore::lock_day`], read that day's appointments, decide in
//! memory with [`AdmissionPolicy::admit`], then write. Callers commit the unit
//! of work only when the returned result is `Ok`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::{CarportError, CarportResult};
use crate::models::normalize_names;
use crate::models::order::{
    CreateOrderRequest, NewOrder, Order, OrderStatus, UpdateOrderPriceRequest,
    UpdateOrderStatusRequest,
};
use crate::scheduling::{AdmissionPolicy, Appointment, Rejection};

/// Duration assumed for a new booking when checking admission.
pub const BOOKING_CHECK_HOURS: u32 = 1;

/// Duration persisted for a new booking until staff set the real one.
pub const DEFAULT_DURATION_HOURS: u32 = 1;

/// Persistence capability needed by the booking workflow.
#[async_trait]
pub trait AppointmentStore: Send {
    /// Blocks other units of work admitting on `day` until this one ends.
    async fn lock_day(&mut self, day: NaiveDate) -> CarportResult<()>;

    /// Owner of the vehicle, or `None` when the vehicle does not exist.
    async fn find_vehicle_owner(&mut self, car_id: i64) -> CarportResult<Option<i64>>;

    /// Every appointment (cancelled ones included) starting in `[from, to)`.
    async fn appointments_between(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> CarportResult<Vec<Appointment>>;

    async fn find_order(&mut self, id: i64) -> CarportResult<Option<Order>>;

    async fn insert_order(&mut self, order: NewOrder) -> CarportResult<Order>;

    /// Stores `status` and, when given, a new `duration`.
    async fn update_schedule(
        &mut self,
        id: i64,
        status: OrderStatus,
        duration: Option<u32>,
    ) -> CarportResult<Order>;

    async fn update_price(&mut self, id: i64, status: OrderStatus, price: u64)
    -> CarportResult<Order>;
}

/// Who is placing a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    /// Staff may book for any vehicle.
    Staff,
    /// Customers may only book their own vehicles.
    Customer(i64),
}

/// Books a new PENDING order for `request.car_id`.
pub async fn book<S>(
    store: &mut S,
    policy: &AdmissionPolicy,
    requester: Requester,
    request: CreateOrderRequest,
) -> CarportResult<Order>
where
    S: AppointmentStore + ?Sized,
{
    request.validate()?;

    if !policy.hours.permits(request.order_time, BOOKING_CHECK_HOURS) {
        return Err(Rejection::OutOfOperatingHours.into());
    }

    let day = policy.hours.local_date(request.order_time);
    store.lock_day(day).await?;

    let owner = store
        .find_vehicle_owner(request.car_id)
        .await?
        .ok_or_else(|| CarportError::not_found("Car", request.car_id))?;

    if let Requester::Customer(user_id) = requester {
        if user_id != owner {
            return Err(CarportError::Authorization(
                "Orders can only be placed for your own car".to_string(),
            ));
        }
    }

    let existing = day_appointments(store, policy, day).await?;
    policy.admit(request.order_time, BOOKING_CHECK_HOURS, &existing, None)?;

    let order = store
        .insert_order(NewOrder {
            user_id: owner,
            car_id: request.car_id,
            service_type: request.service_type.trim().to_string(),
            address: request.address.filter(|address| !address.trim().is_empty()),
            order_time: request.order_time,
            duration: DEFAULT_DURATION_HOURS,
            services: normalize_names(&request.services),
        })
        .await?;

    tracing::info!(
        "Booked order {} for car {} at {}",
        order.id,
        order.car_id,
        order.order_time
    );
    Ok(order)
}

/// Updates an order's status and optionally its duration.
///
/// A new duration goes through admission with the order itself excluded from
/// the overlap count; a status-only update is stored as-is.
pub async fn reschedule<S>(
    store: &mut S,
    policy: &AdmissionPolicy,
    id: i64,
    request: UpdateOrderStatusRequest,
) -> CarportResult<Order>
where
    S: AppointmentStore + ?Sized,
{
    let order = store
        .find_order(id)
        .await?
        .ok_or_else(|| CarportError::not_found("Order", id))?;

    if let Some(duration) = request.duration {
        if duration == 0 {
            return Err(CarportError::validation("duration must be at least one hour"));
        }

        let day = policy.hours.local_date(order.order_time);
        store.lock_day(day).await?;

        let existing = day_appointments(store, policy, day).await?;
        policy.admit(order.order_time, duration, &existing, Some(order.id))?;
    }

    store
        .update_schedule(id, request.status, request.duration)
        .await
}

/// Sets price and status. Scheduling is not re-checked.
pub async fn set_price<S>(
    store: &mut S,
    id: i64,
    request: UpdateOrderPriceRequest,
) -> CarportResult<Order>
where
    S: AppointmentStore + ?Sized,
{
    if store.find_order(id).await?.is_none() {
        return Err(CarportError::not_found("Order", id));
    }

    store.update_price(id, request.status, request.price).await
}

async fn day_appointments<S>(
    store: &mut S,
    policy: &AdmissionPolicy,
    day: NaiveDate,
) -> CarportResult<Vec<Appointment>>
where
    S: AppointmentStore + ?Sized,
{
    let (from, to) = policy.hours.day_bounds(day);
    store.appointments_between(from, to).await
}

//! Order handlers. Booking and rescheduling run inside one
//! [`PgAppointmentStore`] transaction, committed only on success.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use carport_core::{
    booking::{self, Requester},
    errors::CarportError,
    models::address::Address,
    models::order::{
        CreateOrderRequest, Order, OrderQuery, UpdateOrderPriceRequest, UpdateOrderStatusRequest,
        UsedSlot, UsedSlotsQuery,
    },
    models::user::User,
};
use carport_db::repositories::{
    appointment_store::PgAppointmentStore,
    order::{self, OrderFilter},
};

use super::{ApiResult, address, respond};
use crate::{
    ApiState,
    middleware::{
        auth::{AdminUser, AuthUser},
        error_handling::AppError,
    },
};

/// Staff book for anyone; customers only for their own cars.
pub fn requester_for(user: &User) -> Requester {
    if user.is_admin() {
        Requester::Staff
    } else {
        Requester::Customer(user.id)
    }
}

/// Filter for an order listing. Non-admins only ever see their own orders.
pub fn order_filter(state: &ApiState, user: &User, query: &OrderQuery) -> OrderFilter {
    let (from, to) = match query.date {
        Some(date) => {
            let (from, to) = state.policy.hours.day_bounds(date);
            (Some(from), Some(to))
        }
        None => (None, None),
    };

    let user_id = if user.is_admin() {
        query.user_id
    } else {
        Some(user.id)
    };

    OrderFilter {
        from,
        to,
        user_id,
        car_id: query.car_id,
    }
}

#[axum::debug_handler]
pub async fn list_orders(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Query(query): Query<OrderQuery>,
) -> ApiResult<Vec<Order>> {
    let filter = order_filter(&state, &current.user, &query);
    let orders = order::list_orders(&state.db_pool, &filter).await?;

    respond("Orders found", orders)
}

#[axum::debug_handler]
pub async fn used_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<UsedSlotsQuery>,
) -> ApiResult<Vec<UsedSlot>> {
    let date = query
        .date
        .ok_or_else(|| CarportError::validation("date is required"))?;
    let (from, to) = state.policy.hours.day_bounds(date);

    let slots: Vec<UsedSlot> = order::list_used_slots(&state.db_pool, from, to)
        .await?
        .iter()
        .map(UsedSlot::from)
        .collect();

    respond("Used slots found", slots)
}

#[axum::debug_handler]
pub async fn create_order(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Json(mut payload): Json<CreateOrderRequest>,
) -> ApiResult<Order> {
    if let Some(address_id) = payload.address_id {
        let saved = address::load_address(&state, &current.user, address_id).await?;
        payload.use_saved_address(&Address::from(saved));
    }

    let mut store = PgAppointmentStore::begin(&state.db_pool).await?;
    let order = booking::book(&mut store, &state.policy, requester_for(&current.user), payload).await?;
    store.commit().await?;

    respond("Order created", order)
}

#[axum::debug_handler]
pub async fn update_order_status(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> ApiResult<Order> {
    let mut store = PgAppointmentStore::begin(&state.db_pool).await?;
    let order = booking::reschedule(&mut store, &state.policy, id, payload).await?;
    store.commit().await?;

    tracing::info!("Order {} is now {} for {}h", order.id, order.status, order.duration);
    respond("Order updated", order)
}

#[axum::debug_handler]
pub async fn update_order_price(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderPriceRequest>,
) -> ApiResult<Order> {
    let mut store = PgAppointmentStore::begin(&state.db_pool).await?;
    let order = booking::set_price(&mut store, id, payload).await?;
    store.commit().await?;

    respond("Order updated", order)
}

#[axum::debug_handler]
pub async fn delete_order(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    if !order::delete_order(&state.db_pool, id).await? {
        return Err(AppError(CarportError::not_found("Order", id)));
    }

    respond("Order deleted", ())
}

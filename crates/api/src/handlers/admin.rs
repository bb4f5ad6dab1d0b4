use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use carport_core::{
    errors::CarportError,
    models::{
        car::{AdminCreateCarRequest, Car},
        user::{AdminUpdateUserRequest, RegisterRequest, User, UserQuery},
    },
};
use carport_db::repositories::{car, user};

use super::{ApiResult, auth, car as car_handlers, respond};
use crate::{
    ApiState,
    middleware::{auth::AdminUser, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn list_users(State(state): State<Arc<ApiState>>, _admin: AdminUser) -> ApiResult<Vec<User>> {
    let users = user::list_users(&state.db_pool)
        .await?
        .into_iter()
        .map(User::try_from)
        .collect::<eyre::Result<Vec<_>>>()?;

    respond("Users found", users)
}

#[axum::debug_handler]
pub async fn list_user_cars(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Query(query): Query<UserQuery>,
) -> ApiResult<Vec<Car>> {
    let cars = car::list_cars_by_user(&state.db_pool, query.user_id)
        .await?
        .into_iter()
        .map(Car::try_from)
        .collect::<eyre::Result<Vec<_>>>()?;

    respond("Cars found", cars)
}

#[axum::debug_handler]
pub async fn register_user(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<User> {
    let role = payload.role.unwrap_or_default();
    let created = auth::create_account(&state, &payload, role).await?;

    respond("User registered", created)
}

#[axum::debug_handler]
pub async fn create_car(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Json(payload): Json<AdminCreateCarRequest>,
) -> ApiResult<Car> {
    user::get_user_by_id(&state.db_pool, payload.user_id)
        .await?
        .ok_or_else(|| CarportError::not_found("User", payload.user_id))?;

    let created = car_handlers::register_car(&state, payload.user_id, &payload.car).await?;
    respond("Car created", created)
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<AdminUpdateUserRequest>,
) -> ApiResult<User> {
    let updated = auth::apply_profile_edit(&state, id, &payload.profile, payload.role).await?;
    respond("User updated", updated)
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    if admin.id == id {
        return Err(AppError(CarportError::validation(
            "Admins cannot delete their own account",
        )));
    }

    if !user::delete_user(&state.db_pool, id).await? {
        return Err(AppError(CarportError::not_found("User", id)));
    }

    tracing::info!("User {} deleted by admin {}", id, admin.id);
    respond("User deleted", ())
}

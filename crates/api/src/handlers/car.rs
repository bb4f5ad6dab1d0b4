use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use carport_core::{
    errors::CarportError,
    models::{
        car::{Car, CreateCarRequest, UpdateCarRequest, normalize_plate},
        user::User,
    },
};
use carport_db::{
    models::DbCar,
    repositories::{
        car,
        catalog::{self, NamedTable},
    },
};

use super::{ApiResult, ensure_owner_or_admin, respond};
use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

/// Checks the brand exists and the plate is free, then stores the car.
pub(crate) async fn register_car(
    state: &ApiState,
    owner_id: i64,
    request: &CreateCarRequest,
) -> Result<Car, AppError> {
    request.validate()?;
    ensure_brand_exists(state, request.brand_id).await?;

    let plate = normalize_plate(&request.license_plate);
    if car::get_car_by_plate(&state.db_pool, &plate).await?.is_some() {
        return Err(AppError(CarportError::Conflict(format!(
            "License plate {} is already registered",
            plate
        ))));
    }

    let created = car::create_car(&state.db_pool, owner_id, request).await?;
    tracing::info!("Registered car {} for user {}", created.id, owner_id);
    Ok(Car::try_from(created)?)
}

async fn ensure_brand_exists(state: &ApiState, brand_id: i64) -> Result<(), AppError> {
    catalog::get_named(&state.db_pool, NamedTable::Brands, brand_id)
        .await?
        .ok_or_else(|| CarportError::not_found("Brand", brand_id))?;
    Ok(())
}

/// Loads a car the caller may manage: their own, or any car for admins.
async fn load_managed_car(state: &ApiState, user: &User, id: i64) -> Result<DbCar, AppError> {
    let db_car = car::get_car_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| CarportError::not_found("Car", id))?;

    ensure_can_manage(user, &db_car)?;
    Ok(db_car)
}

fn ensure_can_manage(user: &User, db_car: &DbCar) -> Result<(), AppError> {
    ensure_owner_or_admin(user, db_car.user_id, "car")
}

#[axum::debug_handler]
pub async fn create_car(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Json(payload): Json<CreateCarRequest>,
) -> ApiResult<Car> {
    let created = register_car(&state, current.user.id, &payload).await?;
    respond("Car created", created)
}

#[axum::debug_handler]
pub async fn list_cars(State(state): State<Arc<ApiState>>, current: AuthUser) -> ApiResult<Vec<Car>> {
    let cars = car::list_cars_by_user(&state.db_pool, current.user.id)
        .await?
        .into_iter()
        .map(Car::try_from)
        .collect::<eyre::Result<Vec<_>>>()?;

    respond("Cars found", cars)
}

#[axum::debug_handler]
pub async fn get_car_by_plate(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Path(plate): Path<String>,
) -> ApiResult<Car> {
    let db_car = car::get_car_by_plate(&state.db_pool, &plate)
        .await?
        .ok_or_else(|| {
            CarportError::NotFound(format!("Car with plate {} not found", normalize_plate(&plate)))
        })?;

    ensure_can_manage(&current.user, &db_car)?;
    respond("Car found", Car::try_from(db_car)?)
}

#[axum::debug_handler]
pub async fn update_car(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCarRequest>,
) -> ApiResult<Car> {
    let db_car = load_managed_car(&state, &current.user, id).await?;

    if let Some(brand_id) = payload.brand_id {
        ensure_brand_exists(&state, brand_id).await?;
    }

    if let Some(plate) = payload.license_plate.as_deref().map(normalize_plate) {
        if !plate.is_empty() && plate != db_car.license_plate {
            if car::get_car_by_plate(&state.db_pool, &plate).await?.is_some() {
                return Err(AppError(CarportError::Conflict(format!(
                    "License plate {} is already registered",
                    plate
                ))));
            }
        }
    }

    let updated = car::update_car(&state.db_pool, &db_car, &payload).await?;
    respond("Car updated", Car::try_from(updated)?)
}

#[axum::debug_handler]
pub async fn delete_car(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    load_managed_car(&state, &current.user, id).await?;

    if !car::delete_car(&state.db_pool, id).await? {
        return Err(AppError(CarportError::not_found("Car", id)));
    }

    respond("Car deleted", ())
}

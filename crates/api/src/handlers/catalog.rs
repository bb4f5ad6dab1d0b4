use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use carport_core::{
    errors::CarportError,
    models::{
        catalog::{Brand, CarType, CarTypeQuery, Category, Color, CreateNamedRequest, Service, Tag},
        title_case,
    },
};
use carport_db::{
    models::DbNamed,
    repositories::catalog::{self, NamedTable},
};

use super::{ApiResult, respond};
use crate::{
    ApiState,
    middleware::{auth::AdminUser, error_handling::AppError},
};

async fn list_named<T: From<DbNamed>>(state: &ApiState, table: NamedTable) -> Result<Vec<T>, AppError> {
    let rows = catalog::list_named(&state.db_pool, table).await?;
    Ok(rows.into_iter().map(T::from).collect())
}

/// Stores a title-cased name, refusing case-insensitive duplicates.
async fn create_named<T: From<DbNamed>>(
    state: &ApiState,
    table: NamedTable,
    request: &CreateNamedRequest,
) -> Result<T, AppError> {
    let name = title_case(&request.name);
    if name.is_empty() {
        return Err(AppError(CarportError::validation("name is required")));
    }

    let row = catalog::create_named(&state.db_pool, table, &name)
        .await?
        .ok_or_else(|| CarportError::Conflict(format!("{} already exists", name)))?;

    Ok(T::from(row))
}

#[axum::debug_handler]
pub async fn list_colors(State(state): State<Arc<ApiState>>) -> ApiResult<Vec<Color>> {
    respond("Colors found", list_named(&state, NamedTable::Colors).await?)
}

#[axum::debug_handler]
pub async fn list_car_types(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CarTypeQuery>,
) -> ApiResult<Vec<CarType>> {
    let car_types = catalog::list_car_types(&state.db_pool, query.brand_id)
        .await?
        .into_iter()
        .map(CarType::from)
        .collect();

    respond("Car types found", car_types)
}

#[axum::debug_handler]
pub async fn list_services(State(state): State<Arc<ApiState>>) -> ApiResult<Vec<Service>> {
    respond("Services found", list_named(&state, NamedTable::Services).await?)
}

#[axum::debug_handler]
pub async fn list_brands(State(state): State<Arc<ApiState>>) -> ApiResult<Vec<Brand>> {
    respond("Brands found", list_named(&state, NamedTable::Brands).await?)
}

#[axum::debug_handler]
pub async fn create_brand(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateNamedRequest>,
) -> ApiResult<Brand> {
    let brand = create_named(&state, NamedTable::Brands, &payload).await?;
    respond("Brand created", brand)
}

#[axum::debug_handler]
pub async fn list_categories(State(state): State<Arc<ApiState>>) -> ApiResult<Vec<Category>> {
    respond("Categories found", list_named(&state, NamedTable::Categories).await?)
}

#[axum::debug_handler]
pub async fn create_category(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateNamedRequest>,
) -> ApiResult<Category> {
    let category = create_named(&state, NamedTable::Categories, &payload).await?;
    respond("Category created", category)
}

#[axum::debug_handler]
pub async fn delete_category(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    // Articles in the category keep existing without one
    if !catalog::delete_named(&state.db_pool, NamedTable::Categories, id).await? {
        return Err(AppError(CarportError::not_found("Category", id)));
    }

    respond("Category deleted", ())
}

#[axum::debug_handler]
pub async fn list_tags(State(state): State<Arc<ApiState>>) -> ApiResult<Vec<Tag>> {
    respond("Tags found", list_named(&state, NamedTable::Tags).await?)
}

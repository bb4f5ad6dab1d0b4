use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use carport_core::{
    errors::CarportError,
    models::article::{
        Article, ArticleQuery, CreateArticleRequest, UpdateArticleRequest,
        UpdateArticleStatusRequest,
    },
};
use carport_db::repositories::{
    article,
    catalog::{self, NamedTable},
};
use chrono::Utc;

use super::{ApiResult, respond};
use crate::{
    ApiState,
    middleware::{auth::AdminUser, error_handling::AppError},
};

async fn ensure_category_exists(state: &ApiState, category_id: Option<i64>) -> Result<(), AppError> {
    if let Some(id) = category_id {
        catalog::get_named(&state.db_pool, NamedTable::Categories, id)
            .await?
            .ok_or_else(|| CarportError::not_found("Category", id))?;
    }
    Ok(())
}

async fn load_article(state: &ApiState, id: i64) -> Result<Article, AppError> {
    let found = article::get_article_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| CarportError::not_found("Article", id))?;
    Ok(found)
}

#[axum::debug_handler]
pub async fn list_articles(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ArticleQuery>,
) -> ApiResult<Vec<Article>> {
    let articles = article::list_articles(&state.db_pool, &query).await?;
    respond("Articles found", articles)
}

#[axum::debug_handler]
pub async fn get_article(State(state): State<Arc<ApiState>>, Path(id): Path<i64>) -> ApiResult<Article> {
    respond("Article found", load_article(&state, id).await?)
}

#[axum::debug_handler]
pub async fn create_article(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateArticleRequest>,
) -> ApiResult<Article> {
    payload.validate()?;
    ensure_category_exists(&state, payload.category_id).await?;

    let created = article::create_article(&state.db_pool, admin.id, &payload, Utc::now()).await?;
    tracing::info!("Article {} created by {}", created.id, admin.id);

    respond("Article created", created)
}

#[axum::debug_handler]
pub async fn update_article(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> ApiResult<Article> {
    let current = load_article(&state, id).await?;
    ensure_category_exists(&state, payload.category_id).await?;

    let updated = article::update_article(&state.db_pool, &current, &payload, Utc::now()).await?;
    respond("Article updated", updated)
}

#[axum::debug_handler]
pub async fn update_article_status(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleStatusRequest>,
) -> ApiResult<Article> {
    let current = load_article(&state, id).await?;

    let updated = article::set_published(&state.db_pool, &current, payload.published, Utc::now())
        .await?
        .ok_or_else(|| CarportError::not_found("Article", id))?;

    respond("Article status updated", updated)
}

#[axum::debug_handler]
pub async fn delete_article(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    if !article::delete_article(&state.db_pool, id).await? {
        return Err(AppError(CarportError::not_found("Article", id)));
    }

    respond("Article deleted", ())
}

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use carport_core::{
    errors::CarportError,
    models::user::{
        CheckEmailQuery, CheckEmailResponse, EditProfileRequest, LoginRequest, LoginResponse,
        RegisterRequest, Role, User,
    },
};
use carport_db::repositories::{session, user};
use chrono::Utc;

use super::{ApiResult, respond};
use crate::{
    ApiState,
    middleware::{
        auth::{self, AuthUser},
        error_handling::AppError,
    },
};

/// Validates and stores a new account with `role`.
pub(crate) async fn create_account(
    state: &ApiState,
    request: &RegisterRequest,
    role: Role,
) -> Result<User, AppError> {
    request.validate()?;

    let email = request.email.trim().to_lowercase();
    if user::email_exists(&state.db_pool, &email).await? {
        return Err(AppError(CarportError::Conflict(
            "Email is already registered".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let created = user::create_user(
        &state.db_pool,
        request.name.trim(),
        &email,
        request.phone.trim(),
        &password_hash,
        role,
    )
    .await?;

    tracing::info!("Registered user {} with role {}", created.id, role);
    Ok(User::try_from(created)?)
}

/// Applies a profile edit to `id`, keeping email addresses unique.
pub(crate) async fn apply_profile_edit(
    state: &ApiState,
    id: i64,
    request: &EditProfileRequest,
    role: Option<Role>,
) -> Result<User, AppError> {
    request.validate()?;

    let email = request.email.trim().to_lowercase();
    if let Some(existing) = user::get_user_by_email(&state.db_pool, &email).await? {
        if existing.id != id {
            return Err(AppError(CarportError::Conflict(
                "Email is already registered".to_string(),
            )));
        }
    }

    let password_hash = match &request.password {
        Some(password) => Some(auth::hash_password(password)?),
        None => None,
    };

    let updated = user::update_user(
        &state.db_pool,
        id,
        request.name.trim(),
        &email,
        request.phone.trim(),
        password_hash.as_deref(),
        role,
    )
    .await?
    .ok_or_else(|| CarportError::not_found("User", id))?;

    Ok(User::try_from(updated)?)
}

async fn open_session(state: &ApiState, user: User) -> Result<LoginResponse, AppError> {
    let token = auth::generate_session_token();
    let expires_at = Utc::now() + state.session_ttl;

    session::create_session(&state.db_pool, &token, user.id, expires_at).await?;

    Ok(LoginResponse {
        token,
        expires_at,
        user,
    })
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<LoginResponse> {
    // Self-registration always creates a customer account
    let user = create_account(&state, &payload, Role::User).await?;
    let response = open_session(&state, user).await?;

    respond("Registration successful", response)
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let invalid = || CarportError::Authentication("Invalid email or password".to_string());

    let db_user = user::get_user_by_email(&state.db_pool, payload.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !auth::verify_password(&payload.password, &db_user.password_hash)? {
        tracing::debug!("Rejected login for user {}", db_user.id);
        return Err(AppError(invalid()));
    }

    session::delete_expired_sessions(&state.db_pool, Utc::now()).await?;
    let response = open_session(&state, User::try_from(db_user)?).await?;

    respond("Login successful", response)
}

#[axum::debug_handler]
pub async fn logout(State(state): State<Arc<ApiState>>, current: AuthUser) -> ApiResult<()> {
    session::delete_session(&state.db_pool, &current.token).await?;
    respond("Logout successful", ())
}

#[axum::debug_handler]
pub async fn check_email(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CheckEmailQuery>,
) -> ApiResult<CheckEmailResponse> {
    let exists = user::email_exists(&state.db_pool, query.email.trim()).await?;
    respond("Email checked", CheckEmailResponse { exists })
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn current_user(current: AuthUser) -> ApiResult<User> {
    respond("User found", current.user)
}

#[axum::debug_handler]
pub async fn edit_profile(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Json(payload): Json<EditProfileRequest>,
) -> ApiResult<User> {
    // Users cannot change their own role
    let user = apply_profile_edit(&state, current.user.id, &payload, None).await?;
    respond("Profile updated", user)
}

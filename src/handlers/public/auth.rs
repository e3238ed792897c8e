//! Public authentication endpoints: signup and login.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Role;
use crate::database::users::{NewUser, UserStore};
use crate::error::{ApiError, FieldError};
use crate::state::AppState;
use crate::validation;

/// Roles a caller may self-assign at public signup. Admin accounts are only
/// created through the admin endpoint.
const SIGNUP_ROLES: &[Role] = &[Role::User, Role::StoreOwner];

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub password: String,
    pub role: Option<String>,
}

/// POST /auth/signup - create an account and issue a token
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = Role::parse(req.role.as_deref().unwrap_or("user"))
        .filter(|r| SIGNUP_ROLES.contains(r));

    let mut errors = vec![];
    errors.extend(validation::validate_name(&req.name));
    errors.extend(validation::validate_email(&req.email));
    errors.extend(validation::validate_address(req.address.as_deref()));
    errors.extend(validation::validate_password(&req.password));
    if role.is_none() {
        errors.push(FieldError::new("role", "Role must be one of: user, store_owner"));
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }
    // present unless the role error fired above
    let role = role.unwrap_or(Role::User);

    let user = UserStore::new(state.pool.clone())
        .create(NewUser {
            name: &req.name,
            email: &req.email,
            address: req.address.as_deref(),
            password: &req.password,
            role,
        })
        .await?;

    let token = state.tokens.issue(user.id, user.role)?;
    Ok((StatusCode::CREATED, Json(json!({ "token": token, "user": user }))))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login - verify credentials and issue a token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = UserStore::new(state.pool.clone())
        .verify_password(&req.email, &req.password)
        .await?;

    let token = state.tokens.issue(user.id, user.role)?;
    Ok(Json(json!({ "token": token, "user": user })))
}

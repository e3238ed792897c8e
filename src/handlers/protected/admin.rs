//! Admin endpoints: platform totals, user/store creation, and the two
//! admin listing surfaces.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{Role, StoreListing, UserListing};
use crate::database::stores::{NewStore, StoreRepository};
use crate::database::users::{NewUser, UserStore};
use crate::error::{ApiError, FieldError};
use crate::listing::{surface, ListingQuery};
use crate::state::AppState;
use crate::validation;

/// GET /api/admin/dashboard - platform totals
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&state.pool)
        .await?;
    let total_stores: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
        .fetch_one(&state.pool)
        .await?;
    let total_ratings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ratings")
        .fetch_one(&state.pool)
        .await?;

    Ok(Json(json!({
        "totalUsers": total_users,
        "totalStores": total_stores,
        "totalRatings": total_ratings,
    })))
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub password: String,
    pub role: String,
}

/// POST /api/admin/users - admin-initiated account creation; any role
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = Role::parse(&req.role);

    let mut errors = vec![];
    errors.extend(validation::validate_name(&req.name));
    errors.extend(validation::validate_email(&req.email));
    errors.extend(validation::validate_address(req.address.as_deref()));
    errors.extend(validation::validate_password(&req.password));
    if role.is_none() {
        errors.push(FieldError::new("role", "Role must be one of: admin, user, store_owner"));
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }
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

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "userId": user.id })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub owner_id: Uuid,
}

/// POST /api/admin/stores - create a store for an existing store owner
pub async fn create_store(
    State(state): State<AppState>,
    Json(req): Json<CreateStoreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::collect(vec![
        validation::validate_name(&req.name),
        validation::validate_email(&req.email),
        validation::validate_address(req.address.as_deref()),
    ])?;

    let stores = StoreRepository::new(state.pool.clone());
    if !stores.owner_exists(req.owner_id).await? {
        return Err(ApiError::bad_request("Invalid store owner"));
    }

    stores
        .create(NewStore {
            name: &req.name,
            email: &req.email,
            address: req.address.as_deref(),
            owner_id: req.owner_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Store created successfully" }))))
}

#[derive(Debug, Deserialize)]
pub struct UserListingParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// GET /api/admin/users - filtered, sorted user listing
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListingParams>,
) -> Result<Json<Vec<UserListing>>, ApiError> {
    // role is a closed set: exact match on a validated value
    let role = match params.role.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(input) => {
            Some(Role::parse(input).ok_or_else(|| ApiError::bad_request("Invalid role"))?)
        }
        None => None,
    };

    let query = ListingQuery::new(&surface::ADMIN_USERS, "", 1)
        .contains("name", params.name.as_deref())?
        .contains("email", params.email.as_deref())?
        .contains("address", params.address.as_deref())?
        .equals("role", role.map(|r| r.as_str()))?
        .order(params.sort_by.as_deref(), params.order.as_deref())?;

    let users = UserStore::new(state.pool.clone()).list(&query).await?;
    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
pub struct StoreListingParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// GET /api/admin/stores - filtered, sorted store listing with mean rating
pub async fn list_stores(
    State(state): State<AppState>,
    Query(params): Query<StoreListingParams>,
) -> Result<Json<Vec<StoreListing>>, ApiError> {
    let query = ListingQuery::new(&surface::ADMIN_STORES, "s.", 1)
        .contains("name", params.name.as_deref())?
        .contains("email", params.email.as_deref())?
        .contains("address", params.address.as_deref())?
        .order(params.sort_by.as_deref(), params.order.as_deref())?;

    let stores = StoreRepository::new(state.pool.clone()).list(&query).await?;
    Ok(Json(stores))
}

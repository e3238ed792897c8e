//! Store owner endpoints, all scoped to the authenticated owner's stores.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::database::models::{OwnerRating, StoreListing};
use crate::database::ratings::RatingStore;
use crate::database::stores::{NewStore, StoreRepository};
use crate::error::ApiError;
use crate::listing::{surface, ListingQuery};
use crate::middleware::Identity;
use crate::state::AppState;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct StoreListingParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// GET /api/owner/stores - the caller's own stores with mean ratings
pub async fn list_own_stores(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<StoreListingParams>,
) -> Result<Json<Vec<StoreListing>>, ApiError> {
    // owner id occupies $1
    let query = ListingQuery::new(&surface::OWNER_STORES, "s.", 2)
        .contains("name", params.name.as_deref())?
        .contains("email", params.email.as_deref())?
        .contains("address", params.address.as_deref())?
        .order(params.sort_by.as_deref(), params.order.as_deref())?;

    let stores = StoreRepository::new(state.pool.clone())
        .list_owned(identity.user_id, &query)
        .await?;
    Ok(Json(stores))
}

/// GET /api/owner/ratings - ratings across the caller's stores, newest first
pub async fn list_own_ratings(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<OwnerRating>>, ApiError> {
    let ratings = RatingStore::new(state.pool.clone())
        .for_owner(identity.user_id)
        .await?;
    Ok(Json(ratings))
}

#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
}

/// POST /api/owner/stores - create a store owned by the caller
pub async fn create_store(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateStoreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::collect(vec![
        validation::validate_name(&req.name),
        validation::validate_email(&req.email),
        validation::validate_address(req.address.as_deref()),
    ])?;

    StoreRepository::new(state.pool.clone())
        .create(NewStore {
            name: &req.name,
            email: &req.email,
            address: req.address.as_deref(),
            owner_id: identity.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Store created successfully" }))))
}

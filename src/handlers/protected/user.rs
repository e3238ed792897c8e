//! End-user endpoints: browsing stores and submitting ratings.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::StoreForUser;
use crate::database::ratings::RatingStore;
use crate::database::stores::StoreRepository;
use crate::error::ApiError;
use crate::listing::{surface, ListingQuery};
use crate::middleware::Identity;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StoreListingParams {
    pub name: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// GET /api/user/stores - browse stores with the overall mean and the
/// caller's own rating for each
pub async fn list_stores(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<StoreListingParams>,
) -> Result<Json<Vec<StoreForUser>>, ApiError> {
    // caller id occupies $1
    let query = ListingQuery::new(&surface::USER_STORES, "s.", 2)
        .contains("name", params.name.as_deref())?
        .contains("address", params.address.as_deref())?
        .order(params.sort_by.as_deref(), params.order.as_deref())?;

    let stores = StoreRepository::new(state.pool.clone())
        .list_for_user(identity.user_id, &query)
        .await?;
    Ok(Json(stores))
}

#[derive(Debug, Deserialize)]
pub struct RateStoreRequest {
    pub rating: i32,
}

/// POST /api/user/stores/:id/rating - create or overwrite the caller's
/// rating for a store. The confirmation carries the store's fresh mean.
pub async fn rate_store(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(store_id): Path<Uuid>,
    Json(req): Json<RateStoreRequest>,
) -> Result<Json<Value>, ApiError> {
    let ratings = RatingStore::new(state.pool.clone());
    ratings.submit(identity.user_id, store_id, req.rating).await?;
    let average = ratings.average(store_id).await?;

    Ok(Json(json!({ "message": "Rating submitted", "averageRating": average })))
}

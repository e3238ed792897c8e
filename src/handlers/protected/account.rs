//! Account endpoints available to any authenticated role.

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::users::UserStore;
use crate::error::ApiError;
use crate::middleware::Identity;
use crate::state::AppState;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

/// PUT /auth/password - rotate the caller's own password. Identity comes
/// from the verified token; no re-authentication beyond that.
pub async fn update_password(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    validation::collect(vec![validation::validate_password(&req.password)])?;

    UserStore::new(state.pool.clone())
        .update_password(identity.user_id, &req.password)
        .await?;

    Ok(Json(json!({ "message": "Password updated" })))
}

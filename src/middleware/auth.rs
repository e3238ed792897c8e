use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::database::models::Role;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity extracted from the bearer token and attached to
/// the request context for downstream handlers
#[derive(Clone, Debug)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

/// Role sets consumed by [`require_role`]. Each protected route group
/// declares its requirement as data; the gate implementation is shared.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const OWNER_ONLY: &[Role] = &[Role::StoreOwner];
pub const USER_ONLY: &[Role] = &[Role::User];
pub const ANY_ROLE: &[Role] = &[Role::Admin, Role::User, Role::StoreOwner];

/// First gate stage: verify the bearer credential and attach the identity.
/// Missing, malformed, bad-signature and expired tokens all map to 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers)?;
    let claims = state.tokens.verify(&token)?;

    request.extensions_mut().insert(Identity {
        user_id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Second gate stage: check the attached identity against the endpoint's
/// required role set. A valid credential with the wrong role maps to 403.
pub async fn require_role(
    allowed: &'static [Role],
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if !allowed.contains(&identity.role) {
        return Err(ApiError::forbidden("Access denied"));
    }

    Ok(next.run(request).await)
}

/// Extract the token from the Authorization header
fn extract_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err(ApiError::unauthorized("Empty bearer token"));
        }
        Ok(token.to_string())
    } else {
        Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_rejected() {
        let headers = HeaderMap::new();
        let err = extract_bearer(&headers).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn non_bearer_scheme_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(extract_bearer(&headers).unwrap_err().status_code(), 401);
    }

    #[test]
    fn empty_bearer_token_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer   "));
        assert_eq!(extract_bearer(&headers).unwrap_err().status_code(), 401);
    }

    #[test]
    fn role_sets_are_closed() {
        assert!(ADMIN_ONLY.contains(&Role::Admin));
        assert!(!ADMIN_ONLY.contains(&Role::User));
        assert!(!ADMIN_ONLY.contains(&Role::StoreOwner));
        assert!(ANY_ROLE.contains(&Role::StoreOwner));
    }
}

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenService;

/// Shared application state.
///
/// Both members are fixed at startup: the pool is the only storage handle
/// and the token service holds the signing key for its whole lifetime.
/// Nothing else is shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: Arc<TokenService>,
}

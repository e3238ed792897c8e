use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the admin/owner store listing. `average_rating` is the mean
/// of all ratings for the store, null when the store has none.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoreListing {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub average_rating: Option<f64>,
}

/// One row of the end-user store listing: the overall mean plus the
/// requesting user's own rating (null when they have not rated the store).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoreForUser {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub overall_rating: Option<f64>,
    pub user_rating: Option<i32>,
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the store owner's ratings feed, joined with the store name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OwnerRating {
    pub id: Uuid,
    pub store_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub store_name: String,
}

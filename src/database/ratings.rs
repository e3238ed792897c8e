//! Rating submission and aggregation.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

use super::bad_request_on_fk;
use super::models::OwnerRating;

pub struct RatingStore {
    pool: PgPool,
}

impl RatingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create-or-overwrite a user's rating for a store in a single
    /// statement. The (user_id, store_id) uniqueness key resolves concurrent
    /// submissions at the storage boundary; there is no read-then-write
    /// window that could produce duplicate rows.
    pub async fn submit(&self, user_id: Uuid, store_id: Uuid, value: i32) -> Result<(), ApiError> {
        validate_value(value)?;

        sqlx::query(
            "INSERT INTO ratings (id, user_id, store_id, rating) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, store_id) \
             DO UPDATE SET rating = EXCLUDED.rating, updated_at = NOW()",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(store_id)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| bad_request_on_fk(e, "Store not found"))?;

        Ok(())
    }

    /// Mean of all ratings for a store, computed fresh on each read. None
    /// when the store has no ratings - an unrated store is distinguishable
    /// from one rated zero.
    pub async fn average(&self, store_id: Uuid) -> Result<Option<f64>, ApiError> {
        let avg: Option<f64> =
            sqlx::query_scalar("SELECT AVG(rating)::float8 FROM ratings WHERE store_id = $1")
                .bind(store_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(avg)
    }

    /// Ratings across all of an owner's stores, newest first
    pub async fn for_owner(&self, owner_id: Uuid) -> Result<Vec<OwnerRating>, ApiError> {
        let rows = sqlx::query_as::<_, OwnerRating>(
            "SELECT r.id, r.store_id, r.user_id, r.rating, r.created_at, s.name AS store_name \
             FROM ratings r JOIN stores s ON r.store_id = s.id \
             WHERE s.owner_id = $1 ORDER BY r.created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

fn validate_value(value: i32) -> Result<(), ApiError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::bad_request("Rating must be between 1 and 5"))
    }
}

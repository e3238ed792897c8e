//! Store records and the three listing surfaces.
//!
//! Listings project the mean rating per store (null when unrated), computed
//! freshly on every read. Grouping is by the primary key, so every `s.*`
//! column remains addressable in ORDER BY.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::listing::ListingQuery;

use super::conflict_on_unique;
use super::models::{Role, StoreForUser, StoreListing};

pub struct NewStore<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub address: Option<&'a str>,
    pub owner_id: Uuid,
}

pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// True when the referenced user exists with the store_owner role
    pub async fn owner_exists(&self, owner_id: Uuid) -> Result<bool, ApiError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1 AND role = $2")
                .bind(owner_id)
                .bind(Role::StoreOwner.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    pub async fn create(&self, new_store: NewStore<'_>) -> Result<Uuid, ApiError> {
        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores WHERE email = $1")
            .bind(new_store.email)
            .fetch_one(&self.pool)
            .await?;
        if taken > 0 {
            return Err(ApiError::conflict("Store email already exists"));
        }

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO stores (id, name, email, address, owner_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(new_store.name)
        .bind(new_store.email)
        .bind(new_store.address)
        .bind(new_store.owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Store email already exists"))?;

        Ok(id)
    }

    /// Admin listing over all stores
    pub async fn list(&self, query: &ListingQuery) -> Result<Vec<StoreListing>, ApiError> {
        let sql = format!(
            "SELECT s.id, s.name, s.email, s.address, AVG(r.rating)::float8 AS average_rating \
             FROM stores s LEFT JOIN ratings r ON s.id = r.store_id \
             WHERE {} GROUP BY s.id {}",
            query.where_sql(),
            query.order_sql()
        );

        let mut q = sqlx::query_as::<_, StoreListing>(&sql);
        for p in query.params() {
            q = q.bind(p.as_str());
        }
        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Store owner's listing, scoped to their own stores. The owner id is
    /// bound at $1; the filter fragment starts at $2.
    pub async fn list_owned(
        &self,
        owner_id: Uuid,
        query: &ListingQuery,
    ) -> Result<Vec<StoreListing>, ApiError> {
        let sql = format!(
            "SELECT s.id, s.name, s.email, s.address, AVG(r.rating)::float8 AS average_rating \
             FROM stores s LEFT JOIN ratings r ON s.id = r.store_id \
             WHERE s.owner_id = $1 AND {} GROUP BY s.id {}",
            query.where_sql(),
            query.order_sql()
        );

        let mut q = sqlx::query_as::<_, StoreListing>(&sql).bind(owner_id);
        for p in query.params() {
            q = q.bind(p.as_str());
        }
        Ok(q.fetch_all(&self.pool).await?)
    }

    /// End-user listing: overall mean plus the requesting user's own rating
    /// via a correlated lookup on (user_id, store_id). The user id is bound
    /// at $1; the filter fragment starts at $2.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        query: &ListingQuery,
    ) -> Result<Vec<StoreForUser>, ApiError> {
        let sql = format!(
            "SELECT s.id, s.name, s.address, AVG(r.rating)::float8 AS overall_rating, \
             (SELECT rating FROM ratings WHERE user_id = $1 AND store_id = s.id) AS user_rating \
             FROM stores s LEFT JOIN ratings r ON s.id = r.store_id \
             WHERE {} GROUP BY s.id {}",
            query.where_sql(),
            query.order_sql()
        );

        let mut q = sqlx::query_as::<_, StoreForUser>(&sql).bind(user_id);
        for p in query.params() {
            q = q.bind(p.as_str());
        }
        Ok(q.fetch_all(&self.pool).await?)
    }
}

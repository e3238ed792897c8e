//! User credential storage.
//!
//! Exclusively owns user records: creation, password verification, password
//! rotation, and the admin listing all go through here. Plaintext passwords
//! are hashed before persistence and never logged; reads only ever hand out
//! the public projection.

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::config;
use crate::error::ApiError;
use crate::listing::ListingQuery;

use super::conflict_on_unique;
use super::models::{Role, UserListing, UserProfile, UserRow};

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub address: Option<&'a str>,
    pub password: &'a str,
    pub role: Role,
}

pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. Email uniqueness is pre-checked for a friendly
    /// error; the unique index still backstops concurrent signups.
    pub async fn create(&self, new_user: NewUser<'_>) -> Result<UserProfile, ApiError> {
        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(new_user.email)
            .fetch_one(&self.pool)
            .await?;
        if taken > 0 {
            return Err(ApiError::conflict("Email already exists"));
        }

        let cost = config::config().security.bcrypt_cost;
        let password_hash = password::hash_password(new_user.password, cost)?;

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, address, role) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(&password_hash)
        .bind(new_user.address)
        .bind(new_user.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Email already exists"))?;

        Ok(UserProfile {
            id,
            name: new_user.name.to_string(),
            email: new_user.email.to_string(),
            role: new_user.role,
        })
    }

    /// Look up by email and compare against the stored hash. Unknown email
    /// and wrong password are indistinguishable to the caller.
    pub async fn verify_password(
        &self,
        email: &str,
        password_plain: &str,
    ) -> Result<UserProfile, ApiError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash, address, role, created_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Err(ApiError::unauthorized("Invalid credentials"));
        };
        if !password::verify_password(password_plain, &row.password_hash)? {
            return Err(ApiError::unauthorized("Invalid credentials"));
        }

        Ok(row.profile())
    }

    /// Re-hash and overwrite in place
    pub async fn update_password(&self, user_id: Uuid, new_password: &str) -> Result<(), ApiError> {
        let cost = config::config().security.bcrypt_cost;
        let password_hash = password::hash_password(new_password, cost)?;

        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(&password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("User not found"));
        }
        Ok(())
    }

    /// Admin listing with allowlisted filters and sort
    pub async fn list(&self, query: &ListingQuery) -> Result<Vec<UserListing>, ApiError> {
        let sql = format!(
            "SELECT id, name, email, address, role, created_at FROM users WHERE {} {}",
            query.where_sql(),
            query.order_sql()
        );

        let mut q = sqlx::query_as::<_, UserListing>(&sql);
        for p in query.params() {
            q = q.bind(p.as_str());
        }
        Ok(q.fetch_all(&self.pool).await?)
    }
}

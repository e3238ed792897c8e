pub mod auth;

pub use auth::{auth_middleware, require_role, Identity};
pub use auth::{ADMIN_ONLY, ANY_ROLE, OWNER_ONLY, USER_ONLY};

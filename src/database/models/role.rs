use serde::{Deserialize, Serialize};

/// Closed set of platform roles. Stored as text in the `users.role` column
/// and embedded in token claims; every role check goes through this enum
/// rather than ad-hoc string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
    StoreOwner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::StoreOwner => "store_owner",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            "store_owner" => Some(Role::StoreOwner),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        assert_eq!(serde_json::to_string(&Role::StoreOwner).unwrap(), r#""store_owner""#);

        let role: Role = serde_json::from_str(r#""store_owner""#).unwrap();
        assert_eq!(role, Role::StoreOwner);
    }

    #[test]
    fn role_string_conversion() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("STORE_OWNER"), Some(Role::StoreOwner));
        assert_eq!(Role::parse("trader"), None);
        assert_eq!(Role::StoreOwner.as_str(), "store_owner");
    }
}

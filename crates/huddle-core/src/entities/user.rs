//! User entity - identity record owned by the identity provider

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user record with no profile data yet
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            name: None,
            email: None,
            image: None,
            created_at: Utc::now(),
        }
    }

    /// Name shown next to messages, falling back to the email address
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Member")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = User::new(UserId::new(1));
        assert_eq!(user.display_name(), "Member");

        user.email = Some("ann@example.com".to_string());
        assert_eq!(user.display_name(), "ann@example.com");

        user.name = Some("Ann".to_string());
        assert_eq!(user.display_name(), "Ann");
    }
}

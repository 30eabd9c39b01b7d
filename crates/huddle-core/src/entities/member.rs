//! Member entity - a user's role-scoped association with one workspace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::{MemberId, UserId, WorkspaceId};

/// Permission level inside a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(format!("unknown member role: {other}")),
        }
    }
}

/// Member entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub user_id: UserId,
    pub workspace_id: WorkspaceId,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    pub fn new(id: MemberId, user_id: UserId, workspace_id: WorkspaceId, role: MemberRole) -> Self {
        Self {
            id,
            user_id,
            workspace_id,
            role,
            joined_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_text() {
        assert_eq!("admin".parse::<MemberRole>().unwrap(), MemberRole::Admin);
        assert_eq!(MemberRole::Member.to_string(), "member");
        assert!("owner".parse::<MemberRole>().is_err());
    }

    #[test]
    fn test_role_json_is_lowercase() {
        assert_eq!(serde_json::to_string(&MemberRole::Admin).unwrap(), "\"admin\"");
        let role: MemberRole = serde_json::from_str("\"member\"").unwrap();
        assert_eq!(role, MemberRole::Member);
    }

    #[test]
    fn test_member_is_admin() {
        let m = Member::new(
            MemberId::new(1),
            UserId::new(2),
            WorkspaceId::new(3),
            MemberRole::Admin,
        );
        assert!(m.is_admin());
    }
}

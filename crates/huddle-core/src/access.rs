//! Authorization decision
//!
//! Given the caller's membership row (already looked up through the
//! `(workspace_id, user_id)` index) decide whether an operation may proceed.

use crate::entities::{Member, MemberRole};
use crate::error::DomainError;

/// What an operation needs from the caller's membership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any role
    Member,
    /// Role must be admin
    Admin,
}

/// Decide whether `member` satisfies `requirement`.
///
/// A missing membership and an insufficient role both fail with
/// [`DomainError::Unauthorized`].
pub fn authorize(member: Option<&Member>, requirement: Requirement) -> Result<&Member, DomainError> {
    let member = member.ok_or(DomainError::Unauthorized)?;
    let allowed = match (requirement, member.role) {
        (Requirement::Member, MemberRole::Admin | MemberRole::Member) => true,
        (Requirement::Admin, MemberRole::Admin) => true,
        (Requirement::Admin, MemberRole::Member) => false,
    };
    if allowed {
        Ok(member)
    } else {
        Err(DomainError::Unauthorized)
    }
}

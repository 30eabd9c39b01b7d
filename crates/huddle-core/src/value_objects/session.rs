//! Per-request session context

use super::ids::UserId;

/// The identity behind one request, passed explicitly to every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    user_id: Option<UserId>,
}

impl Session {
    pub const fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub const fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// The current user, if the request carried a valid identity
    #[inline]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    #[inline]
    pub const fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

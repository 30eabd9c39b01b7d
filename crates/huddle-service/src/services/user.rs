//! User service
//!
//! User records mirror the identity provider. They are created the first
//! time a user joins or creates a workspace and refreshed from token claims.

use huddle_core::{Session, User, UserId};
use tracing::{info, instrument};

use crate::dto::{SyncProfileRequest, UserResponse};
use crate::live::Collection;

use super::access::AccessControl;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's user record; `None` when anonymous or never synced
    #[instrument(skip(self, session))]
    pub async fn current(&self, session: &Session) -> ServiceResult<Option<UserResponse>> {
        let Some(user_id) = session.user_id() else {
            return Ok(None);
        };
        let user = self.ctx.user_repo().find_by_id(user_id).await?;
        Ok(user.as_ref().map(UserResponse::from))
    }

    /// Upsert the caller's profile; fields left out keep their stored value
    #[instrument(skip(self, session, request))]
    pub async fn sync_profile(
        &self,
        session: &Session,
        request: SyncProfileRequest,
    ) -> ServiceResult<UserId> {
        let user_id = AccessControl::new(self.ctx).require_user(session)?;

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .unwrap_or_else(|| User::new(user_id));
        if request.name.is_some() {
            user.name = request.name;
        }
        if request.email.is_some() {
            user.email = request.email;
        }
        if request.image.is_some() {
            user.image = request.image;
        }
        self.ctx.user_repo().upsert(&user).await?;
        self.ctx.publish(Collection::Users, None);

        info!(user_id = %user_id, "User profile synced");
        Ok(user_id)
    }

    /// Create an empty user record unless one exists
    pub(crate) async fn ensure_exists(&self, user_id: UserId) -> ServiceResult<()> {
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            self.ctx.user_repo().upsert(&User::new(user_id)).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sync_then_current() {
        let ctx = ServiceContext::in_memory();
        let service = UserService::new(&ctx);
        let session = Session::authenticated(UserId::new(5));

        assert!(service.current(&session).await.unwrap().is_none());

        service
            .sync_profile(
                &session,
                SyncProfileRequest {
                    name: Some("Ada".to_string()),
                    ..SyncProfileRequest::default()
                },
            )
            .await
            .unwrap();
        service
            .sync_profile(
                &session,
                SyncProfileRequest {
                    email: Some("ada@example.com".to_string()),
                    ..SyncProfileRequest::default()
                },
            )
            .await
            .unwrap();

        let user = service.current(&session).await.unwrap().unwrap();
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_anonymous() {
        let ctx = ServiceContext::in_memory();
        let service = UserService::new(&ctx);
        assert!(service.current(&Session::anonymous()).await.unwrap().is_none());
        let err = service
            .sync_profile(&Session::anonymous(), SyncProfileRequest::default())
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }
}

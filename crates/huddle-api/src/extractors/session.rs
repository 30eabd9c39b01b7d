//! Session extractor
//!
//! Resolves the bearer token from the Authorization header into a [`Session`].
//! The extractor never rejects: a missing or bad token yields an anonymous
//! session and the service layer decides what that caller may do.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use huddle_common::IdentityProfile;
use huddle_core::Session;

use crate::state::AppState;

/// The caller behind a request, with the profile claims of their token
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    pub session: Session,
    pub profile: Option<IdentityProfile>,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok();

        let app_state = AppState::from_ref(state);
        let (session, profile) = app_state
            .jwt_service()
            .resolve(bearer.as_ref().map(|TypedHeader(Authorization(b))| b.token()));

        Ok(Self { session, profile })
    }
}

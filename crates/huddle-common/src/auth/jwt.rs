//! JWT identity tokens
//!
//! The identity provider signs HS256 tokens whose `sub` is the user id. A
//! token only ever yields a [`Session`]; it never grants workspace access by
//! itself.

use chrono::{Duration, Utc};
use huddle_core::{Session, UserId};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Profile fields carried alongside the identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(flatten)]
    pub profile: IdentityProfile,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }
}

/// Issues and verifies identity tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: &str, token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry,
        }
    }

    /// Mint a token for a user, as the identity provider would
    pub fn issue(&self, user_id: UserId, profile: IdentityProfile) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
            profile,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }

    /// Decode and validate a token
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Turn an optional bearer token into a session and its profile claims.
    ///
    /// Missing, malformed and expired tokens all resolve to an anonymous
    /// session.
    pub fn resolve(&self, token: Option<&str>) -> (Session, Option<IdentityProfile>) {
        let Some(token) = token else {
            return (Session::anonymous(), None);
        };

        match self.decode_token(token).and_then(|claims| {
            let user_id = claims.user_id()?;
            Ok((user_id, claims.profile))
        }) {
            Ok((user_id, profile)) => (Session::authenticated(user_id), Some(profile)),
            Err(e) => {
                tracing::warn!(error = %e, "Rejected bearer token, treating request as anonymous");
                (Session::anonymous(), None)
            }
        }
    }

    pub fn resolve_session(&self, token: Option<&str>) -> Session {
        self.resolve(token).0
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_expiry", &self.token_expiry)
            .finish_non_exhaustive()
    }
}

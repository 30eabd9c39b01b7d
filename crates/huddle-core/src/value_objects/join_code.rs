//! Join codes - short tokens gating self-service workspace membership

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A workspace invitation token: 6 characters of lowercase base36
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinCode(String);

impl JoinCode {
    pub const LENGTH: usize = 6;

    /// Draw a fresh code uniformly from `[0-9a-z]`.
    ///
    /// Codes are not checked for collisions; a code is only ever compared
    /// against the one workspace it was issued for.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..Self::LENGTH)
            .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
            .collect();
        Self(code)
    }

    /// Wrap a code read back from storage
    pub fn from_stored(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Case-insensitive comparison against a user-supplied code
    pub fn matches(&self, supplied: &str) -> bool {
        supplied.to_lowercase() == self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

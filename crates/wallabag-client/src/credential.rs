//! Bearer credential and its in-memory cache.

use chrono::{DateTime, Duration, Utc};

use crate::client::TokenResponse;
use crate::error::WallabagError;

/// Short-lived bearer token for the remote service. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Builds a credential that expires `expires_in` seconds after `now`.
    ///
    /// A negative lifetime, or one that does not fit a timestamp, is rejected.
    pub fn from_response(
        response: &TokenResponse,
        now: DateTime<Utc>,
    ) -> Result<Self, WallabagError> {
        if response.expires_in < 0 {
            return Err(WallabagError::InvalidTokenResponse(format!(
                "negative expires_in: {}",
                response.expires_in
            )));
        }
        let expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                WallabagError::InvalidTokenResponse(format!(
                    "expires_in out of range: {}",
                    response.expires_in
                ))
            })?;

        Ok(Self {
            token: response.access_token.clone(),
            expires_at,
        })
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty() && now < self.expires_at
    }
}

/// Single-owner cache of the current [`Credential`].
///
/// Not synchronized: exactly one dispatch worker owns and refreshes it.
#[derive(Debug, Default)]
pub struct CredentialCache {
    current: Option<Credential>,
}

impl CredentialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-seeded with `credential`.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            current: Some(credential),
        }
    }

    /// The cached credential if it is still valid at `now`.
    pub fn valid_at(&self, now: DateTime<Utc>) -> Option<&Credential> {
        self.current.as_ref().filter(|c| c.is_valid_at(now))
    }

    pub fn current(&self) -> Option<&Credential> {
        self.current.as_ref()
    }

    pub fn store(&mut self, credential: Credential) {
        self.current = Some(credential);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

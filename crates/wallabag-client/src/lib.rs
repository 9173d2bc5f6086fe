//! # Wallabag API client
//!
//! Thin reqwest wrapper for the two endpoints the bot needs: the OAuth password-grant
//! token endpoint and entry creation. [`CredentialCache`] holds the bearer token between
//! calls; it has no internal locking and is meant to be owned by a single worker.

mod client;
mod config;
mod credential;
mod error;

pub use client::{TokenResponse, WallabagClient};
pub use config::WallabagConfig;
pub use credential::{Credential, CredentialCache};
pub use error::WallabagError;

/// Masks a token or secret for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of it.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

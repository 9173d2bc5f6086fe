//! Remote service credentials and address.

use serde::Deserialize;

/// Where the wallabag instance lives and how to authenticate against it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WallabagConfig {
    /// Bare host (`app.wallabag.it`, implies https) or base URL (`http://localhost:8080`).
    pub site: String,
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl WallabagConfig {
    /// Base URL without trailing slash.
    pub fn base_url(&self) -> String {
        let site = self.site.trim().trim_end_matches('/');
        if site.starts_with("http://") || site.starts_with("https://") {
            site.to_string()
        } else {
            format!("https://{}", site)
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/v2/token", self.base_url())
    }

    pub fn entries_url(&self) -> String {
        format!("{}/api/entries.json", self.base_url())
    }

    /// Names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("site", &self.site),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("username", &self.username),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

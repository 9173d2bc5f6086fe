//! Allow-list of Telegram usernames whose messages are ingested.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SenderFilter {
    allowed: HashSet<String>,
}

impl SenderFilter {
    /// Builds the filter; a leading `@` and surrounding whitespace are ignored, empty entries dropped.
    pub fn from_usernames<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = usernames
            .into_iter()
            .map(|s| s.as_ref().trim().trim_start_matches('@').to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { allowed }
    }

    /// Senders without a username are never allowed.
    pub fn allows(&self, username: Option<&str>) -> bool {
        username.is_some_and(|name| self.allowed.contains(name))
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }
}

/// Result of persisting a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// A new record was written with `saved = false`; carries its id.
    Inserted(i64),
    /// A record with the same URL already exists; nothing was written.
    Duplicate,
}

impl PersistOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, PersistOutcome::Inserted(_))
    }
}

/// Result of acknowledging a URL as saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkSavedOutcome {
    /// The flag went from false to true.
    Updated,
    /// The flag was already true; nothing changed.
    AlreadySaved,
    /// No record exists for the URL.
    Missing,
}

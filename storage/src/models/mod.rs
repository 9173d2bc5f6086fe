//! Persistence models.

mod outcome;
mod request_record;

pub use outcome::{MarkSavedOutcome, PersistOutcome};
pub use request_record::RequestRecord;

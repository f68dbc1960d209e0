mod csv_file;
mod memory;

pub use csv_file::CsvPersistence;
pub use memory::MemoryPersistence;

use super::domain::{Candidate, CandidateId};

/// Durable record storage consumed by the candidate store.
pub trait PersistenceAdapter: Send + Sync {
    /// Every stored record, in storage order. Called once when a store opens.
    fn load_all(&self) -> Result<Vec<Candidate>, PersistenceError>;
    /// Inserts or overwrites the record keyed by `candidate.id`.
    fn save(&self, candidate: &Candidate) -> Result<(), PersistenceError>;
    fn remove(&self, id: CandidateId) -> Result<(), PersistenceError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to access candidate storage: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid candidate record: {0}")]
    Csv(#[from] csv::Error),
    #[error("candidate storage unavailable: {0}")]
    Unavailable(String),
}

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{PersistenceAdapter, PersistenceError};
use crate::candidates::domain::{Candidate, CandidateId};

/// Process-local storage, used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    records: Mutex<BTreeMap<CandidateId, Candidate>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds storage so a store opened on it starts populated.
    pub fn with_records(records: impl IntoIterator<Item = Candidate>) -> Self {
        let records = records
            .into_iter()
            .map(|candidate| (candidate.id, candidate))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn snapshot(&self) -> Result<Vec<Candidate>, PersistenceError> {
        self.load_all()
    }

    fn guard(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<CandidateId, Candidate>>, PersistenceError>
    {
        self.records
            .lock()
            .map_err(|_| PersistenceError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl PersistenceAdapter for MemoryPersistence {
    fn load_all(&self) -> Result<Vec<Candidate>, PersistenceError> {
        Ok(self.guard()?.values().cloned().collect())
    }

    fn save(&self, candidate: &Candidate) -> Result<(), PersistenceError> {
        self.guard()?.insert(candidate.id, candidate.clone());
        Ok(())
    }

    fn remove(&self, id: CandidateId) -> Result<(), PersistenceError> {
        self.guard()?.remove(&id);
        Ok(())
    }
}

use std::collections::BTreeMap;

use super::domain::{Candidate, CandidateId};

/// Map from candidate ID to the stored record.
///
/// Iteration runs in ascending ID order, so every listing built from this
/// index is deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    records: BTreeMap<CandidateId, Candidate>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `candidate`, returning whatever record held its ID before.
    pub fn put(&mut self, candidate: Candidate) -> Option<Candidate> {
        self.records.insert(candidate.id, candidate)
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn remove(&mut self, id: CandidateId) -> Option<Candidate> {
        self.records.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

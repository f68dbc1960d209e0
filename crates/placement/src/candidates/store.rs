use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{Candidate, CandidateId};
use super::identity::IdentityIndex;
use super::ordered::OrderedIndex;
use super::persistence::{PersistenceAdapter, PersistenceError};
use super::query::{QueryEngine, ShortlistCriteria};

/// Aggregate root owning both indexes and the storage adapter.
///
/// Every live ID sits in the identity index and in exactly one bucket slot
/// keyed by that record's GPA. Storage is written before the indexes change,
/// so a failing adapter leaves the in-memory state as it was.
pub struct CandidateStore<P> {
    ordered: OrderedIndex,
    identity: IdentityIndex,
    persistence: P,
}

/// Snapshot served by the report command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateReport {
    pub total_candidates: usize,
    pub shortlisted_candidates: usize,
    pub candidates: Vec<Candidate>,
}

/// Error raised by the candidate store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("candidate {0} already exists")]
    DuplicateId(CandidateId),
    #[error("candidate {0} not found")]
    NotFound(CandidateId),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl<P> CandidateStore<P>
where
    P: PersistenceAdapter,
{
    /// Rebuilds both indexes from everything the adapter holds.
    pub fn open(persistence: P) -> Result<Self, StoreError> {
        let records = persistence.load_all()?;
        let mut store = Self {
            ordered: OrderedIndex::new(),
            identity: IdentityIndex::new(),
            persistence,
        };

        for candidate in records {
            if store.identity.contains(candidate.id) {
                return Err(StoreError::DuplicateId(candidate.id));
            }
            store.index(candidate);
        }

        info!(
            candidates = store.len(),
            tree_height = store.ordered.height(),
            "candidate store opened"
        );
        Ok(store)
    }

    pub fn add(&mut self, candidate: Candidate) -> Result<(), StoreError> {
        if self.identity.contains(candidate.id) {
            warn!(id = %candidate.id, "rejected candidate with duplicate id");
            return Err(StoreError::DuplicateId(candidate.id));
        }

        self.persistence.save(&candidate)?;
        info!(id = %candidate.id, gpa = candidate.gpa, "candidate added");
        self.index(candidate);
        Ok(())
    }

    /// Removes the record from storage and from both indexes.
    pub fn delete(&mut self, id: CandidateId) -> Result<Candidate, StoreError> {
        let gpa = match self.identity.get(id) {
            Some(candidate) => candidate.gpa,
            None => return Err(StoreError::NotFound(id)),
        };

        self.persistence.remove(id)?;
        self.ordered.detach(gpa, id);
        let removed = self.identity.remove(id).ok_or(StoreError::NotFound(id))?;
        info!(%id, "candidate deleted");
        Ok(removed)
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.identity.get(id)
    }

    pub fn queries(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.ordered, &self.identity)
    }

    pub fn sort_by_gpa(&self) -> Vec<&Candidate> {
        self.queries().sort_by_gpa()
    }

    pub fn search_by_gpa(&self, gpa: f64) -> Vec<&Candidate> {
        let found = self.queries().search_by_gpa(gpa);
        debug!(gpa, matches = found.len(), "searched by gpa");
        found
    }

    pub fn shortlist(&self, criteria: &ShortlistCriteria) -> Vec<&Candidate> {
        let shortlisted = self.queries().shortlist(criteria);
        debug!(?criteria, matches = shortlisted.len(), "shortlist evaluated");
        shortlisted
    }

    pub fn filter_by_coding_marks(&self, min_marks: f64) -> Vec<&Candidate> {
        self.queries().filter_by_coding_marks(min_marks)
    }

    pub fn report(&self) -> CandidateReport {
        CandidateReport {
            total_candidates: self.identity.len(),
            shortlisted_candidates: self.shortlist(&ShortlistCriteria::report_default()).len(),
            candidates: self.identity.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identity.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn index(&mut self, candidate: Candidate) {
        self.ordered.insert(candidate.gpa, candidate.id);
        self.identity.put(candidate);
    }
}

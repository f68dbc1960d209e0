use std::sync::{Arc, Mutex};

use tracing::info;

use crate::candidates::{Candidate, CandidateId, CandidateStore, PersistenceAdapter, StoreError};
use crate::scheduling::Scheduler;

/// Store and scheduler driven together by one command surface.
///
/// Concurrent hosts share it as [`SharedSession`], one lock over both
/// indexes and the slot list.
pub struct PlacementSession<P> {
    pub store: CandidateStore<P>,
    pub scheduler: Scheduler,
}

pub type SharedSession<P> = Arc<Mutex<PlacementSession<P>>>;

impl<P> PlacementSession<P>
where
    P: PersistenceAdapter,
{
    pub fn new(store: CandidateStore<P>) -> Self {
        Self {
            store,
            scheduler: Scheduler::new(),
        }
    }

    pub fn open(persistence: P) -> Result<Self, StoreError> {
        Ok(Self::new(CandidateStore::open(persistence)?))
    }

    pub fn shared(self) -> SharedSession<P> {
        Arc::new(Mutex::new(self))
    }

    /// Registers a slot labelled `time` and books `id` into the first free
    /// slot with that label. Repeating a label opens another slot, so a
    /// known candidate is always booked.
    pub fn schedule_interview(
        &mut self,
        time: &str,
        id: CandidateId,
    ) -> Result<&Candidate, StoreError> {
        let candidate = self.store.get(id).ok_or(StoreError::NotFound(id))?;

        self.scheduler.add_slot(time);
        let assigned = self.scheduler.assign_candidate(time, candidate);
        debug_assert!(assigned, "freshly registered slot is free");

        info!(%id, time, "interview scheduled");
        Ok(candidate)
    }
}

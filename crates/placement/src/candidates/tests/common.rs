use std::sync::atomic::{AtomicBool, Ordering};

use axum::response::Response;
use serde_json::Value;

use crate::candidates::domain::{Candidate, CandidateId};
use crate::candidates::persistence::{MemoryPersistence, PersistenceAdapter, PersistenceError};
use crate::candidates::store::CandidateStore;
use crate::session::{PlacementSession, SharedSession};

pub(super) fn alice() -> Candidate {
    Candidate::new(1, "Alice", 3.8, 3, ["Python", "SQL"], 80.0)
}

pub(super) fn bob() -> Candidate {
    Candidate::new(2, "Bob", 3.8, 1, ["Java"], 60.0)
}

/// A mixed population exercising several GPA keys and one shared key.
pub(super) fn cohort() -> Vec<Candidate> {
    vec![
        Candidate::new(10, "Priya", 3.9, 4, ["Python", "Data Structures", "Go"], 91.0),
        Candidate::new(11, "Marco", 3.2, 2, ["Python", "Data Structures"], 88.0),
        Candidate::new(12, "Lena", 3.6, 1, ["Python", "Data Structures"], 95.0),
        Candidate::new(13, "Tomas", 3.6, 5, ["Data Structures", "Python"], 77.0),
        Candidate::new(14, "Yuki", 2.8, 6, ["Rust"], 99.0),
        Candidate::new(15, "Omar", 3.5, 2, ["Python", "Data Structures"], 74.9),
    ]
}

pub(super) fn memory_store() -> CandidateStore<MemoryPersistence> {
    CandidateStore::open(MemoryPersistence::new()).expect("empty store opens")
}

pub(super) fn seeded_store(candidates: Vec<Candidate>) -> CandidateStore<MemoryPersistence> {
    let mut store = memory_store();
    for candidate in candidates {
        store.add(candidate).expect("seed candidate added");
    }
    store
}

pub(super) fn shared_session(candidates: Vec<Candidate>) -> SharedSession<MemoryPersistence> {
    PlacementSession::new(seeded_store(candidates)).shared()
}

pub(super) fn names(candidates: &[&Candidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|candidate| candidate.name.clone())
        .collect()
}

/// Memory storage that can be taken offline, after which every write fails.
#[derive(Default)]
pub(super) struct SwitchablePersistence {
    inner: MemoryPersistence,
    offline: AtomicBool,
}

impl SwitchablePersistence {
    pub(super) fn go_offline(&self) {
        self.offline.store(true, Ordering::Release);
    }

    pub(super) fn stored(&self) -> Vec<Candidate> {
        self.inner.snapshot().expect("memory snapshot")
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.offline.load(Ordering::Acquire) {
            Err(PersistenceError::Unavailable("database offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl PersistenceAdapter for SwitchablePersistence {
    fn load_all(&self) -> Result<Vec<Candidate>, PersistenceError> {
        self.check()?;
        self.inner.load_all()
    }

    fn save(&self, candidate: &Candidate) -> Result<(), PersistenceError> {
        self.check()?;
        self.inner.save(candidate)
    }

    fn remove(&self, id: CandidateId) -> Result<(), PersistenceError> {
        self.check()?;
        self.inner.remove(id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

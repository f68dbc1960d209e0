//! Candidate indexing engine.
//!
//! Records are held once, in the identity index. The ordered index is a BST
//! over GPA whose buckets carry candidate IDs, so GPA-ordered queries resolve
//! every slot back through the identity index.

pub mod bucket;
pub mod domain;
pub mod identity;
pub mod ordered;
pub mod persistence;
pub mod query;
pub mod router;
pub mod store;

#[cfg(test)]
mod tests;

pub use bucket::DuplicateBucket;
pub use domain::{Candidate, CandidateId};
pub use identity::IdentityIndex;
pub use ordered::{OrderedIndex, Traverse};
pub use persistence::{CsvPersistence, MemoryPersistence, PersistenceAdapter, PersistenceError};
pub use query::{QueryEngine, ShortlistCriteria};
pub use router::candidate_router;
pub use store::{CandidateReport, CandidateStore, StoreError};

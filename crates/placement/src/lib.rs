//! Candidate placement: GPA-ordered candidate indexing, shortlisting, and
//! interview scheduling.

pub mod candidates;
pub mod config;
pub mod error;
pub mod scheduling;
pub mod session;
pub mod telemetry;

pub use candidates::{Candidate, CandidateId, CandidateStore, ShortlistCriteria};
pub use session::{PlacementSession, SharedSession};

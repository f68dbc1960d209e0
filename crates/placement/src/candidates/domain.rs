use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-assigned identifier for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u64);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CandidateId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Candidate record as submitted. Field ranges are not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub gpa: f64,
    pub experience: i64,
    /// Kept in submission order; membership checks ignore order.
    pub skills: Vec<String>,
    pub coding_marks: f64,
}

impl Candidate {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        gpa: f64,
        experience: i64,
        skills: impl IntoIterator<Item = impl Into<String>>,
        coding_marks: f64,
    ) -> Self {
        Self {
            id: CandidateId(id),
            name: name.into(),
            gpa,
            experience,
            skills: skills.into_iter().map(Into::into).collect(),
            coding_marks,
        }
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|owned| owned == skill)
    }

    /// True when every entry of `required` is one of this candidate's skills.
    pub fn has_all_skills<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|skill| self.has_skill(skill.as_ref()))
    }

    pub fn skills_label(&self) -> String {
        self.skills.join(", ")
    }
}

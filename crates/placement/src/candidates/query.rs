use serde::{Deserialize, Serialize};

use super::bucket::DuplicateBucket;
use super::domain::Candidate;
use super::identity::IdentityIndex;
use super::ordered::{canonical_key, OrderedIndex};

/// Thresholds a candidate must meet to be shortlisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistCriteria {
    pub min_gpa: f64,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub min_experience: i64,
    #[serde(default)]
    pub min_coding_marks: f64,
}

impl ShortlistCriteria {
    pub const REPORT_MIN_GPA: f64 = 3.5;
    pub const REPORT_SKILLS: [&'static str; 2] = ["Python", "Data Structures"];
    pub const REPORT_MIN_EXPERIENCE: i64 = 2;
    pub const REPORT_MIN_CODING_MARKS: f64 = 75.0;

    /// Fixed thresholds used when counting shortlisted candidates in reports.
    pub fn report_default() -> Self {
        Self {
            min_gpa: Self::REPORT_MIN_GPA,
            required_skills: Self::REPORT_SKILLS.iter().map(|s| s.to_string()).collect(),
            min_experience: Self::REPORT_MIN_EXPERIENCE,
            min_coding_marks: Self::REPORT_MIN_CODING_MARKS,
        }
    }

    /// Checks everything except the GPA bound, which the traversal applies per node.
    fn admits(&self, candidate: &Candidate) -> bool {
        candidate.experience >= self.min_experience
            && candidate.coding_marks >= self.min_coding_marks
            && candidate.has_all_skills(&self.required_skills)
    }
}

/// Read-only queries composed over the ordered and identity indexes.
///
/// Ordered-index buckets carry IDs only. A slot resolves to a record when the
/// identity index still holds that ID with the bucket's GPA; anything else
/// is skipped.
#[derive(Clone, Copy)]
pub struct QueryEngine<'a> {
    ordered: &'a OrderedIndex,
    identity: &'a IdentityIndex,
}

impl<'a> QueryEngine<'a> {
    pub fn new(ordered: &'a OrderedIndex, identity: &'a IdentityIndex) -> Self {
        Self { ordered, identity }
    }

    /// Every live candidate by ascending GPA, ties in arrival order.
    pub fn sort_by_gpa(self) -> Vec<&'a Candidate> {
        let identity = self.identity;
        self.ordered
            .traverse()
            .flat_map(|(key, bucket)| resolve(identity, key, bucket))
            .collect()
    }

    pub fn search_by_gpa(self, gpa: f64) -> Vec<&'a Candidate> {
        match self.ordered.search_exact(gpa) {
            Some(bucket) => resolve(self.identity, gpa, bucket).collect(),
            None => Vec::new(),
        }
    }

    /// Walks every node; no subtree is pruned even below `min_gpa`.
    pub fn shortlist(self, criteria: &ShortlistCriteria) -> Vec<&'a Candidate> {
        let identity = self.identity;
        self.ordered
            .traverse()
            .filter(|(key, _)| *key >= criteria.min_gpa)
            .flat_map(|(key, bucket)| resolve(identity, key, bucket))
            .filter(|candidate| criteria.admits(candidate))
            .collect()
    }

    /// Candidates scoring at least `min_marks`, in identity-index order.
    pub fn filter_by_coding_marks(self, min_marks: f64) -> Vec<&'a Candidate> {
        self.identity
            .iter()
            .filter(|candidate| candidate.coding_marks >= min_marks)
            .collect()
    }
}

fn resolve<'a>(
    identity: &'a IdentityIndex,
    key: f64,
    bucket: &'a DuplicateBucket,
) -> impl Iterator<Item = &'a Candidate> + 'a {
    bucket
        .iter()
        .filter_map(move |id| identity.get(id))
        .filter(move |candidate| {
            canonical_key(candidate.gpa).total_cmp(&canonical_key(key)).is_eq()
        })
}

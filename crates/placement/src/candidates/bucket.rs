use super::domain::CandidateId;

/// Candidates sharing one GPA key, in arrival order.
///
/// Slots hold identifiers only; records live in the identity index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateBucket {
    slots: Vec<CandidateId>,
}

impl DuplicateBucket {
    pub fn with_first(id: CandidateId) -> Self {
        Self { slots: vec![id] }
    }

    pub fn push(&mut self, id: CandidateId) {
        self.slots.push(id);
    }

    /// Drops the first slot holding `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: CandidateId) -> bool {
        match self.slots.iter().position(|slot| *slot == id) {
            Some(index) => {
                self.slots.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = CandidateId> + '_ {
        self.slots.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_keeps_remaining_arrival_order() {
        let mut bucket = DuplicateBucket::with_first(CandidateId(3));
        bucket.push(CandidateId(1));
        bucket.push(CandidateId(2));

        assert!(bucket.remove(CandidateId(1)));
        assert!(!bucket.remove(CandidateId(9)));
        assert_eq!(
            bucket.iter().collect::<Vec<_>>(),
            vec![CandidateId(3), CandidateId(2)]
        );
    }
}

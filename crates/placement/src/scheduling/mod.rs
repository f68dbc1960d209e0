//! Interview slot assignment.
//!
//! Slots live in a flat list scanned front to back. Labels are free-form and
//! may repeat; each registration is an independent slot.

use serde::Serialize;

use crate::candidates::Candidate;

/// Label shown for a slot nobody has been assigned to.
pub const FREE_LABEL: &str = "Free";

#[derive(Debug, Clone, PartialEq, Eq)]
struct InterviewSlot {
    time: String,
    /// Name of the booked candidate.
    assignee: Option<String>,
}

/// One row of the schedule listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub time: String,
    pub candidate: String,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    slots: Vec<InterviewSlot>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_slot(&mut self, time: impl Into<String>) {
        self.slots.push(InterviewSlot {
            time: time.into(),
            assignee: None,
        });
    }

    /// Fills the first free slot labelled `time`. Returns false when every
    /// such slot is taken or the label was never registered.
    pub fn assign_candidate(&mut self, time: &str, candidate: &Candidate) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|slot| slot.time == time && slot.assignee.is_none())
        {
            Some(slot) => {
                slot.assignee = Some(candidate.name.clone());
                true
            }
            None => false,
        }
    }

    /// Every slot in registration order, with the assignee's name or [`FREE_LABEL`].
    pub fn list_schedule(&self) -> Vec<ScheduleEntry> {
        self.slots
            .iter()
            .map(|slot| ScheduleEntry {
                time: slot.time.clone(),
                candidate: slot
                    .assignee
                    .as_ref()
                    .map_or_else(|| FREE_LABEL.to_string(), Clone::clone),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

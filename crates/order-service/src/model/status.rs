//! Order statuses and the cyclic sequence they move through.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Identifier of an order status, as stored on the order row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusId(pub u32);

impl StatusId {
    pub const RECEIVED: StatusId = StatusId(1);
    pub const PREPARING: StatusId = StatusId(2);
    pub const READY: StatusId = StatusId(3);

    /// Human-readable name for the well-known statuses.
    pub fn label(self) -> Option<&'static str> {
        match self {
            StatusId::RECEIVED => Some("Received"),
            StatusId::PREPARING => Some("Preparing"),
            StatusId::READY => Some("Ready"),
            _ => None,
        }
    }
}

impl Display for StatusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "status_{}", self.0),
        }
    }
}

/// Reasons a list of statuses cannot form a sequence.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SequenceError {
    #[error("status sequence needs at least 2 statuses, got {0}")]
    TooShort(usize),

    #[error("status {0} appears more than once")]
    Duplicate(StatusId),
}

/// Ordered, cyclic list of statuses. The last element is the terminal status.
///
/// Immutable once built; construction rejects sequences shorter than two and duplicates,
/// so the terminal status is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StatusId>", into = "Vec<StatusId>")]
pub struct StatusSequence {
    statuses: Vec<StatusId>,
}

impl StatusSequence {
    pub fn new(statuses: Vec<StatusId>) -> Result<Self, SequenceError> {
        if statuses.len() < 2 {
            return Err(SequenceError::TooShort(statuses.len()));
        }
        for (i, status) in statuses.iter().enumerate() {
            if statuses[..i].contains(status) {
                return Err(SequenceError::Duplicate(*status));
            }
        }
        Ok(Self { statuses })
    }

    /// `Received -> Preparing -> Ready`.
    pub fn standard() -> Self {
        Self {
            statuses: vec![StatusId::RECEIVED, StatusId::PREPARING, StatusId::READY],
        }
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Always false; kept alongside `len` for clippy.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn index_of(&self, status: StatusId) -> Option<usize> {
        self.statuses.iter().position(|s| *s == status)
    }

    pub fn contains(&self, status: StatusId) -> bool {
        self.statuses.contains(&status)
    }

    /// Position after `index`, wrapping to 0 after the last one.
    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.statuses.len()
    }

    /// # Panics
    /// If `index` is out of range.
    pub fn value_at(&self, index: usize) -> StatusId {
        self.statuses[index]
    }

    pub fn first(&self) -> StatusId {
        self.statuses[0]
    }

    pub fn terminal(&self) -> StatusId {
        self.statuses[self.statuses.len() - 1]
    }

    pub fn is_terminal(&self, status: StatusId) -> bool {
        self.terminal() == status
    }

    pub fn iter(&self) -> impl Iterator<Item = StatusId> + '_ {
        self.statuses.iter().copied()
    }
}

impl Default for StatusSequence {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<StatusId>> for StatusSequence {
    type Error = SequenceError;

    fn try_from(statuses: Vec<StatusId>) -> Result<Self, Self::Error> {
        Self::new(statuses)
    }
}

impl From<StatusSequence> for Vec<StatusId> {
    fn from(sequence: StatusSequence) -> Self {
        sequence.statuses
    }
}

impl Display for StatusSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|s| s.to_string()).collect();
        write!(f, "[{}]", names.join(" -> "))
    }
}

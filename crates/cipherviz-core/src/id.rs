//! Stable ID newtype for trace records.
//!
//! Record ids are contiguous within one [`StepTrace`](crate::trace::StepTrace),
//! starting at 0, so a `StepId` doubles as the record's index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sequence position of a record within its trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u32);

impl StepId {
    /// The index of this record in its trace.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// Display just prints the inner value.

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StepId {
    fn from(index: usize) -> Self {
        StepId(index as u32)
    }
}

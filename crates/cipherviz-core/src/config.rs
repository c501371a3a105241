//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Divisor of the automatic fill stride: roughly fifteen progress records
/// per decrypt, whatever the text length.
const AUTO_FILL_RECORDS: usize = 15;

/// Configuration for the rail fence engine.
///
/// Only trace verbosity is configurable; results never depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailFenceConfig {
    /// Emit a decrypt fill record every this many cells. `None` picks
    /// `max(1, len / 15)`; `Some(0)` behaves like `Some(1)`.
    pub fill_stride: Option<usize>,
}

impl RailFenceConfig {
    /// One fill record per cell.
    pub fn verbose() -> Self {
        RailFenceConfig {
            fill_stride: Some(1),
        }
    }

    /// The stride actually used for a text of `len` characters.
    pub fn fill_stride_for(&self, len: usize) -> usize {
        match self.fill_stride {
            Some(stride) => stride.max(1),
            None => (len / AUTO_FILL_RECORDS).max(1),
        }
    }
}

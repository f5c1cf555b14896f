use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A fixed sample-index interval partitioning the recording.
///
/// Stored as a `[start, end]` pair. The epoch list of a recording is
/// sorted ascending and epochs never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Epoch {
    pub start: i64,
    pub end: i64,
}

impl Epoch {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Whether `point` lies inside this epoch, boundaries included.
    pub fn contains(&self, point: i64) -> bool {
        self.start <= point && point <= self.end
    }
}

impl From<[i64; 2]> for Epoch {
    fn from([start, end]: [i64; 2]) -> Self {
        Self { start, end }
    }
}

impl From<Epoch> for [i64; 2] {
    fn from(epoch: Epoch) -> Self {
        [epoch.start, epoch.end]
    }
}

/// Returns the index of the unique epoch containing `point`.
///
/// Relies on the epochs being non-overlapping: the first containing epoch
/// is the only one. A point outside every epoch indicates corrupt input
/// and fails with [`Error::EpochNotFound`].
pub fn find_epoch_index(epochs: &[Epoch], point: i64) -> Result<usize> {
    epochs
        .iter()
        .position(|epoch| epoch.contains(point))
        .ok_or(Error::EpochNotFound { position: point })
}

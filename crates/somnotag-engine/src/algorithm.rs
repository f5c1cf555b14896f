use serde::{Deserialize, Serialize};

/// One declared parameter of an algorithm, surfaced by the presentation
/// layer as an option panel entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmOption {
    pub name: String,
    pub value: f64,
}

impl AlgorithmOption {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Contract for event detection algorithms.
///
/// `compute` runs against the full per-epoch channel data and returns one
/// row per detected event: a single sample index for a point or a
/// `[start, end]` pair for an interval. Rows must be homogeneous within
/// one run; the engine rejects anything else as malformed output.
/// Execution is a blocking call with no cancellation at this layer.
pub trait Algorithm {
    fn name(&self) -> &str;

    /// Declared parameters, in display order.
    fn options(&self) -> Vec<AlgorithmOption> {
        Vec::new()
    }

    fn compute(&self, channel_data: &[Vec<f64>], sampling_rate: u32) -> Vec<Vec<i64>>;
}

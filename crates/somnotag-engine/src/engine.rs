use somnotag_store::Recording;
use somnotag_types::LabelSet;

use crate::algorithm::Algorithm;
use crate::error::Result;

/// Run-time environment for detection algorithms.
#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Engine
    }

    /// Executes `algorithm` against the recording's channel data and
    /// classifies the raw rows into a homogeneous label set. A malformed
    /// row fails with an unsupported-event-shape error.
    pub fn run(&self, algorithm: &dyn Algorithm, recording: &Recording) -> Result<LabelSet> {
        let rows = algorithm.compute(recording.channel_data()?, recording.sampling_rate());
        Ok(LabelSet::from_rows(&rows)?)
    }
}

use somnotag_store::Recording;
use somnotag_types::{Event, LabelSet};

use crate::algorithm::{Algorithm, AlgorithmOption};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::navigator::Navigator;

/// Orchestrates one reconciliation pass: compute labels, diff them against
/// the stored set, migrate tags, refresh the checkpoint and derive typed
/// events.
///
/// [`Processor::compute_labels`] must run before
/// [`Processor::compute_navigator`]; the processor buffers the computed
/// label set between the two calls.
pub struct Processor {
    engine: Engine,
    algorithms: Vec<Box<dyn Algorithm>>,
    current: Option<usize>,
    buffered: Option<LabelSet>,
}

impl Processor {
    pub fn new(algorithms: Vec<Box<dyn Algorithm>>) -> Self {
        Self {
            engine: Engine::new(),
            algorithms,
            current: None,
            buffered: None,
        }
    }

    /// Selects the algorithm to run. Index `0` selects none: the stored
    /// labels are used as-is. Index `i > 0` selects the `i - 1`-th
    /// registered algorithm and returns its declared options.
    pub fn select_algorithm(&mut self, index: usize) -> Result<Option<Vec<AlgorithmOption>>> {
        if index == 0 {
            self.current = None;
            return Ok(None);
        }
        let algorithm = self
            .algorithms
            .get(index - 1)
            .ok_or(Error::UnknownAlgorithm { index })?;
        let options = algorithm.options();
        self.current = Some(index - 1);
        Ok(Some(options))
    }

    /// Public API to execute an algorithm against a recording, independent
    /// of the current selection.
    pub fn run(&self, algorithm: &dyn Algorithm, recording: &Recording) -> Result<LabelSet> {
        self.engine.run(algorithm, recording)
    }

    /// Computes and buffers the labels for `recording`: the selected
    /// algorithm's output, or the stored labels when none is selected.
    pub fn compute_labels(&mut self, recording: &Recording) -> Result<()> {
        let labels = match self.current {
            Some(index) => {
                let algorithm = self
                    .algorithms
                    .get(index)
                    .ok_or(Error::UnknownAlgorithm { index: index + 1 })?;
                self.engine.run(algorithm.as_ref(), recording)?
            }
            None => recording.labels().clone(),
        };
        self.buffered = Some(labels);
        Ok(())
    }

    /// Labels buffered by the last [`Processor::compute_labels`] call.
    pub fn buffered_labels(&self) -> Option<&LabelSet> {
        self.buffered.as_ref()
    }

    /// Reconciles the buffered labels with the recording.
    ///
    /// Diffs the buffered labels against the stored set (any shape
    /// mismatch counts as changed), writes them back — migrating tags —
    /// and drops the checkpoint when the set changed, since any saved
    /// review progress no longer refers to the stored events. Returns one
    /// event per label in label order, tag flags switched on for stored
    /// tag values above zero.
    pub fn compute_navigator(&mut self, recording: &mut Recording) -> Result<Navigator> {
        let labels = self.buffered.clone().ok_or(Error::LabelsNotComputed)?;

        let changes_made = labels != *recording.labels();
        recording.set_labels(labels);
        if changes_made {
            recording.remove_checkpoint();
        }

        let events = derive_events(recording)?;
        Ok(Navigator::new(events, changes_made))
    }
}

/// Derives one typed event per stored label, in label order.
fn derive_events(recording: &mut Recording) -> Result<Vec<Event>> {
    let labels = recording.labels().clone();
    let tags = recording.tags().to_vec();

    let mut events = Vec::with_capacity(labels.len());
    for (index, label) in labels.iter().enumerate() {
        let source = recording.data_source_for(index)?;
        let mut event = Event::from_label(label, source);
        if tags.get(index).copied().unwrap_or(0) > 0 {
            event.switch_tag();
        }
        events.push(event);
    }
    Ok(events)
}

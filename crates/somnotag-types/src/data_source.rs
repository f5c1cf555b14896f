use std::cell::RefCell;

use crate::epoch::Epoch;
use crate::label::Label;

/// Per-epoch bundle of samples handed to events for display.
///
/// One data source exists per epoch index. The recording store creates it
/// lazily on first access and caches it for the recording's lifetime; an
/// epoch hosting several labels hands out the same shared source for each
/// of them, accumulating the label values as they are resolved.
#[derive(Debug)]
pub struct DataSource {
    raw: Vec<f64>,
    filtered: Vec<f64>,
    epoch: Epoch,
    sampling_rate: u32,
    labels: RefCell<Vec<Label>>,
}

impl DataSource {
    pub fn new(raw: Vec<f64>, filtered: Vec<f64>, epoch: Epoch, sampling_rate: u32) -> Self {
        Self {
            raw,
            filtered,
            epoch,
            sampling_rate,
            labels: RefCell::new(Vec::new()),
        }
    }

    pub fn raw(&self) -> &[f64] {
        &self.raw
    }

    pub fn filtered(&self) -> &[f64] {
        &self.filtered
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate
    }

    /// Attaches a label living in this source's epoch.
    pub fn add_label(&self, label: Label) {
        self.labels.borrow_mut().push(label);
    }

    /// Labels attached so far, in attachment order.
    pub fn labels(&self) -> Vec<Label> {
        self.labels.borrow().clone()
    }
}

use std::collections::HashMap;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use somnotag_types::{DataSource, Epoch, Label, LabelSet, find_epoch_index};

use crate::container::{RecordingContainer, unwrap_raw};
use crate::error::{Error, Result};

/// Sampling rate of the supported recording hardware, in Hz.
pub const DEFAULT_SAMPLING_RATE: u32 = 500;

/// Writes `value` into `slot` unconditionally and reports whether the
/// stored value changed. Every dirty-flag decision funnels through here.
fn write_tracked<T: PartialEq>(slot: &mut T, value: T) -> bool {
    let changed = *slot != value;
    *slot = value;
    changed
}

/// In-session view of one recording.
///
/// Owns the container, derives epoch-aligned views of the channel data on
/// demand and tracks whether persisted state has drifted from computed
/// state (`changes_made`). Labels, tags, user labels and the checkpoint
/// are mutated in place; data sources are created lazily per epoch and
/// live as long as the recording. One logical session mutates one
/// recording at a time; nothing here is thread-safe.
#[derive(Debug)]
pub struct Recording {
    container: RecordingContainer,
    sampling_rate: u32,
    /// Per-epoch sample rows derived from the container's nested storage
    /// form. Computed once on first access and kept for the recording's
    /// lifetime; there is no invalidation path.
    channel_cache: OnceCell<Vec<Vec<f64>>>,
    data_sources: HashMap<usize, Rc<DataSource>>,
    changes_made: bool,
}

impl Recording {
    pub fn new(container: RecordingContainer) -> Self {
        Self::with_sampling_rate(container, DEFAULT_SAMPLING_RATE)
    }

    pub fn with_sampling_rate(container: RecordingContainer, sampling_rate: u32) -> Self {
        Self {
            container,
            sampling_rate,
            channel_cache: OnceCell::new(),
            data_sources: HashMap::new(),
            changes_made: false,
        }
    }

    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate
    }

    pub fn epochs(&self) -> &[Epoch] {
        &self.container.epochs
    }

    pub fn labels(&self) -> &LabelSet {
        &self.container.labels
    }

    pub fn number_of_labels(&self) -> usize {
        self.container.labels.len()
    }

    /// Replaces the stored labels and immediately migrates the tags from
    /// the previous label set onto the new one.
    pub fn set_labels(&mut self, labels: LabelSet) {
        let old_labels = std::mem::replace(&mut self.container.labels, labels);
        self.migrate_tags(&old_labels);
    }

    /// Per-epoch raw sample rows. The first access unwraps the container's
    /// nested storage form and memoizes the result for the recording's
    /// lifetime.
    pub fn channel_data(&self) -> Result<&[Vec<f64>]> {
        let rows = self
            .channel_cache
            .get_or_try_init(|| unwrap_raw(&self.container.channel_data))?;
        Ok(rows.as_slice())
    }

    /// Filtered channel data, one row per epoch. The first access seeds a
    /// deep copy of the raw channel data into the container; from then on
    /// reads and writes hit the persisted copy.
    pub fn channel_data_filtered(&mut self) -> Result<&[Vec<f64>]> {
        self.materialize_filtered()?;
        Ok(self.container.channel_data_filtered.as_deref().unwrap_or(&[]))
    }

    fn materialize_filtered(&mut self) -> Result<()> {
        if self.container.channel_data_filtered.is_none() {
            let seeded = self.channel_data()?.to_vec();
            self.container.channel_data_filtered = Some(seeded);
        }
        Ok(())
    }

    /// Replaces the filtered data of one epoch. Sets the dirty flag when
    /// the new row differs element-wise from the stored one; the write
    /// itself is unconditional.
    pub fn set_filtered_data(&mut self, index: usize, data: Vec<f64>) -> Result<()> {
        self.materialize_filtered()?;
        let rows = self
            .container
            .channel_data_filtered
            .get_or_insert_with(Vec::new);
        let row = rows
            .get_mut(index)
            .ok_or(Error::EpochOutOfRange { index })?;
        self.changes_made |= write_tracked(row, data);
        Ok(())
    }

    /// Stored user labels; empty when never set.
    pub fn user_labels(&self) -> &[i64] {
        self.container.user_labels.as_deref().unwrap_or(&[])
    }

    /// Replaces the user labels. Sets the dirty flag when the new values
    /// differ element-wise from the current ones; the write itself is
    /// unconditional.
    pub fn set_user_labels(&mut self, labels: Vec<i64>) {
        let mut current = self.container.user_labels.take().unwrap_or_default();
        self.changes_made |= write_tracked(&mut current, labels);
        self.container.user_labels = Some(current);
    }

    /// Per-label tag values. Materializes an all-zero vector sized to the
    /// label count on first access and persists it into the container.
    pub fn tags(&mut self) -> &[u32] {
        let count = self.number_of_labels();
        self.container.tags.get_or_insert_with(|| vec![0; count])
    }

    /// Overwrites the tag values. Tag writes never touch the dirty flag;
    /// label and user-label diffing drive it.
    pub fn set_tags(&mut self, tags: Vec<u32>) {
        self.container.tags = Some(tags);
    }

    /// Data source for the epoch hosting the label at `label_index`. The
    /// label value is attached to the source, so resolving every label of
    /// a recomputation accumulates co-located labels on one shared source.
    pub fn data_source_for(&mut self, label_index: usize) -> Result<Rc<DataSource>> {
        let label = self
            .container
            .labels
            .get(label_index)
            .ok_or(Error::LabelOutOfRange { index: label_index })?;
        self.data_source_for_label(label)
    }

    /// Data source for the epoch containing `label`. Intervals resolve by
    /// their start sample; events never span epoch boundaries, so point
    /// and interval labels are covered alike.
    pub fn data_source_for_label(&mut self, label: Label) -> Result<Rc<DataSource>> {
        let epoch_index = find_epoch_index(self.epochs(), label.anchor())?;
        let source = self.buffered_data_source(epoch_index)?;
        source.add_label(label);
        Ok(source)
    }

    fn buffered_data_source(&mut self, epoch_index: usize) -> Result<Rc<DataSource>> {
        if let Some(source) = self.data_sources.get(&epoch_index) {
            return Ok(Rc::clone(source));
        }

        let epoch = *self
            .container
            .epochs
            .get(epoch_index)
            .ok_or(Error::EpochOutOfRange { index: epoch_index })?;
        let raw = self
            .channel_data()?
            .get(epoch_index)
            .cloned()
            .ok_or(Error::EpochOutOfRange { index: epoch_index })?;
        self.materialize_filtered()?;
        let filtered = self
            .container
            .channel_data_filtered
            .as_deref()
            .unwrap_or(&[])
            .get(epoch_index)
            .cloned()
            .ok_or(Error::EpochOutOfRange { index: epoch_index })?;

        let source = Rc::new(DataSource::new(raw, filtered, epoch, self.sampling_rate));
        self.data_sources.insert(epoch_index, Rc::clone(&source));
        Ok(source)
    }

    /// Maps the previous tags onto the current labels. A tag follows its
    /// label value to that value's position in the new set; a tag whose
    /// value no longer exists is dropped silently. Sets with differing
    /// shapes migrate nothing and leave every new tag at zero.
    fn migrate_tags(&mut self, old_labels: &LabelSet) {
        let old_tags = self.exchange_tags(old_labels.len());

        let new_labels = &self.container.labels;
        if !old_labels.is_compliant_with(new_labels) {
            return;
        }
        let Some(tags) = self.container.tags.as_mut() else {
            return; // exchange_tags always materializes them
        };

        for (old_index, old_label) in old_labels.iter().enumerate() {
            if let Some(new_index) = new_labels.position_of(old_label) {
                if let (Some(slot), Some(tag)) = (tags.get_mut(new_index), old_tags.get(old_index))
                {
                    *slot = *tag;
                }
            }
        }
    }

    /// Takes the current tags aside and resets the live tags to zeros
    /// sized to the current label count. Tags never materialized before
    /// read as zeros sized to the previous label count.
    fn exchange_tags(&mut self, old_count: usize) -> Vec<u32> {
        let old_tags = self
            .container
            .tags
            .take()
            .unwrap_or_else(|| vec![0; old_count]);
        self.container.tags = Some(vec![0; self.number_of_labels()]);
        old_tags
    }

    /// Stores `checkpoint` as the container's string-encoded progress
    /// marker.
    pub fn set_checkpoint(&mut self, checkpoint: i64) {
        self.container.checkpoint = Some(checkpoint.to_string());
    }

    /// Stored progress marker. Absent or unparseable markers read as
    /// `None`; no error surfaces.
    pub fn checkpoint(&self) -> Option<i64> {
        self.container.checkpoint.as_deref()?.parse().ok()
    }

    /// Drops the progress marker; a no-op when none is stored.
    pub fn remove_checkpoint(&mut self) {
        self.container.checkpoint = None;
    }

    /// Flattened channel data scaled from sample units to seconds.
    pub fn points_in_seconds(&self) -> Result<Vec<f64>> {
        let rate = f64::from(self.sampling_rate);
        Ok(self
            .channel_data()?
            .iter()
            .flatten()
            .map(|sample| sample / rate)
            .collect())
    }

    /// Whether any persisted field drifted from its stored state since
    /// construction or the last [`Recording::clear_changes`].
    pub fn changes_made(&self) -> bool {
        self.changes_made
    }

    /// Resets the dirty flag, typically after the container was persisted.
    pub fn clear_changes(&mut self) {
        self.changes_made = false;
    }

    /// The backing container in its persistable form.
    pub fn container(&self) -> &RecordingContainer {
        &self.container
    }

    pub fn into_container(self) -> RecordingContainer {
        self.container
    }
}

use serde::{Deserialize, Serialize};

use somnotag_types::{Epoch, LabelSet};

use crate::error::{Error, Result};

/// Channel samples exactly as the scientific container stores them: a
/// single-element outer wrapper, one entry per epoch, each entry wrapping
/// its sample row once more. [`unwrap_raw`] flattens this to one row per
/// epoch.
pub type RawChannelData = Vec<Vec<Vec<Vec<f64>>>>;

/// Flattens the stored nesting: drops the redundant outer wrapper
/// dimension and unwraps one nesting level per epoch entry. A missing
/// level means the container is corrupt.
pub fn unwrap_raw(raw: &RawChannelData) -> Result<Vec<Vec<f64>>> {
    let entries = raw.first().ok_or(Error::CorruptChannelData)?;
    entries
        .iter()
        .map(|entry| entry.first().cloned().ok_or(Error::CorruptChannelData))
        .collect()
}

/// Explicit schema of the scientific recording container.
///
/// Field names on the wire match the container's external keys. Fields the
/// container may lack (filtered copy, tags, user labels, checkpoint) are
/// explicit optionals here instead of being probed by key existence. The
/// on-disk layout beyond these named fields is owned externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingContainer {
    /// Non-overlapping `[start, end]` sample intervals, sorted ascending.
    #[serde(rename = "sampleInfo")]
    pub epochs: Vec<Epoch>,

    /// Stored event labels, points or intervals.
    #[serde(rename = "label", default)]
    pub labels: LabelSet,

    /// Channel samples in the container's nested storage form.
    #[serde(rename = "channelData")]
    pub channel_data: RawChannelData,

    /// Filtered copy of the channel data, one row per epoch. Materialized
    /// lazily by the store on first access and persisted from then on.
    #[serde(
        rename = "channelDataFiltered",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub channel_data_filtered: Option<Vec<Vec<f64>>>,

    /// Explicitly set user labels, independent of the detected labels.
    #[serde(
        rename = "sleepyUserLabels",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_labels: Option<Vec<i64>>,

    /// Per-label annotation values, `0` = untagged, `> 0` = tagged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u32>>,

    /// Review-progress marker, stored string-encoded.
    #[serde(
        rename = "sleepy-metadata-checkpoint",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub checkpoint: Option<String>,
}

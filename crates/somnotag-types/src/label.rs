use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A detected event position inside a recording.
///
/// Points mark a single sample index; intervals mark a `[start, end]`
/// sample range. A recording's label set is homogeneous, one shape per
/// recording (see [`LabelSet`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Point(i64),
    Interval([i64; 2]),
}

impl Label {
    /// Sample position used for epoch lookup. Intervals resolve by their
    /// start sample; events never span epoch boundaries, so the start is
    /// enough to find the containing epoch.
    pub fn anchor(&self) -> i64 {
        match self {
            Label::Point(position) => *position,
            Label::Interval([start, _]) => *start,
        }
    }
}

/// Shape of one raw detector row, decided once per row by [`classify_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelShape {
    Point(i64),
    Interval(i64, i64),
    /// Neither a point nor a `[start, end]` pair. Carries the row arity.
    Unsupported(usize),
}

/// Classifies one raw detector row by arity.
pub fn classify_row(row: &[i64]) -> LabelShape {
    match row {
        [position] => LabelShape::Point(*position),
        [start, end] => LabelShape::Interval(*start, *end),
        other => LabelShape::Unsupported(other.len()),
    }
}

/// Homogeneous, ordered collection of labels.
///
/// Mirrors the stored form: a recording holds either point labels or
/// interval labels, never a mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSet {
    Points(Vec<i64>),
    Intervals(Vec<[i64; 2]>),
}

impl Default for LabelSet {
    fn default() -> Self {
        LabelSet::Points(Vec::new())
    }
}

impl LabelSet {
    pub fn len(&self) -> usize {
        match self {
            LabelSet::Points(values) => values.len(),
            LabelSet::Intervals(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Label> {
        match self {
            LabelSet::Points(values) => values.get(index).copied().map(Label::Point),
            LabelSet::Intervals(values) => values.get(index).copied().map(Label::Interval),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    /// First index holding exactly this label value, if any. Lookup is by
    /// value, not position: a tag follows its label only while the same
    /// event position still exists after recomputation.
    pub fn position_of(&self, label: Label) -> Option<usize> {
        match (self, label) {
            (LabelSet::Points(values), Label::Point(position)) => {
                values.iter().position(|value| *value == position)
            }
            (LabelSet::Intervals(values), Label::Interval(interval)) => {
                values.iter().position(|value| *value == interval)
            }
            _ => None,
        }
    }

    /// Whether tags may migrate between this set and `other`: both must
    /// carry the same label shape.
    pub fn is_compliant_with(&self, other: &LabelSet) -> bool {
        matches!(
            (self, other),
            (LabelSet::Points(_), LabelSet::Points(_))
                | (LabelSet::Intervals(_), LabelSet::Intervals(_))
        )
    }

    /// Builds a homogeneous set from raw detector rows.
    ///
    /// Every row must classify to the same shape. A row that is neither a
    /// point nor a `[start, end]` pair fails with
    /// [`Error::UnsupportedEventShape`]; a run mixing both shapes fails
    /// with [`Error::MixedEventShapes`]. An empty run yields an empty
    /// point set.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<LabelSet> {
        let mut set: Option<LabelSet> = None;
        for row in rows {
            set = Some(match (classify_row(row), set.take()) {
                (LabelShape::Point(position), None) => LabelSet::Points(vec![position]),
                (LabelShape::Point(position), Some(LabelSet::Points(mut values))) => {
                    values.push(position);
                    LabelSet::Points(values)
                }
                (LabelShape::Interval(start, end), None) => {
                    LabelSet::Intervals(vec![[start, end]])
                }
                (LabelShape::Interval(start, end), Some(LabelSet::Intervals(mut values))) => {
                    values.push([start, end]);
                    LabelSet::Intervals(values)
                }
                (LabelShape::Unsupported(arity), _) => {
                    return Err(Error::UnsupportedEventShape { arity });
                }
                (LabelShape::Point(_), Some(LabelSet::Intervals(_)))
                | (LabelShape::Interval(..), Some(LabelSet::Points(_))) => {
                    return Err(Error::MixedEventShapes);
                }
            });
        }
        Ok(set.unwrap_or_default())
    }
}

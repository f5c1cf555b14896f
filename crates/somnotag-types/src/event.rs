use std::rc::Rc;

use crate::data_source::DataSource;
use crate::label::Label;

/// A typed event derived from one stored label.
///
/// Events are re-derived on every reconciliation pass; only labels and
/// tags are persisted. Each event shares its epoch's [`DataSource`] with
/// every other event living in the same epoch.
#[derive(Debug, Clone)]
pub enum Event {
    Point {
        position: i64,
        source: Rc<DataSource>,
        tagged: bool,
    },
    Interval {
        start: i64,
        end: i64,
        source: Rc<DataSource>,
        tagged: bool,
    },
}

impl Event {
    /// Builds the untagged event for `label`.
    pub fn from_label(label: Label, source: Rc<DataSource>) -> Self {
        match label {
            Label::Point(position) => Event::Point {
                position,
                source,
                tagged: false,
            },
            Label::Interval([start, end]) => Event::Interval {
                start,
                end,
                source,
                tagged: false,
            },
        }
    }

    pub fn label(&self) -> Label {
        match self {
            Event::Point { position, .. } => Label::Point(*position),
            Event::Interval { start, end, .. } => Label::Interval([*start, *end]),
        }
    }

    pub fn source(&self) -> &Rc<DataSource> {
        match self {
            Event::Point { source, .. } | Event::Interval { source, .. } => source,
        }
    }

    pub fn is_tagged(&self) -> bool {
        match self {
            Event::Point { tagged, .. } | Event::Interval { tagged, .. } => *tagged,
        }
    }

    /// Flips the user tag on this event.
    pub fn switch_tag(&mut self) {
        match self {
            Event::Point { tagged, .. } | Event::Interval { tagged, .. } => *tagged = !*tagged,
        }
    }
}

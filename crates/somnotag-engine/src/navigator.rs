use somnotag_types::Event;

/// Result of one reconciliation pass: the derived events plus whether the
/// recomputed label set differed from the stored one.
#[derive(Debug)]
pub struct Navigator {
    events: Vec<Event>,
    changes_made: bool,
}

impl Navigator {
    pub fn new(events: Vec<Event>, changes_made: bool) -> Self {
        Self {
            events,
            changes_made,
        }
    }

    /// Derived events, in label order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Whether reconciliation replaced the stored label set.
    pub fn changes_made(&self) -> bool {
        self.changes_made
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

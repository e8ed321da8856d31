use std::collections::HashSet;

use crate::EventType;

/// Decides which event types reach the plugins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    AllowAll,
    Include(HashSet<EventType>),
    Exclude(HashSet<EventType>),
}

impl EventFilter {
    pub fn allow_all() -> Self {
        EventFilter::AllowAll
    }

    pub fn include(types: impl IntoIterator<Item = EventType>) -> Self {
        EventFilter::Include(types.into_iter().collect())
    }

    pub fn exclude(types: impl IntoIterator<Item = EventType>) -> Self {
        EventFilter::Exclude(types.into_iter().collect())
    }

    /// Build a filter from the `events.filter_mode` / `events.event_types` settings.
    pub fn from_config(filter_mode: &str, event_types: &[String]) -> Result<Self, String> {
        let types = event_types
            .iter()
            .map(|s| s.parse::<EventType>())
            .collect::<Result<HashSet<_>, _>>()?;

        match filter_mode.trim() {
            "allow_all" => Ok(EventFilter::AllowAll),
            "include" => Ok(EventFilter::Include(types)),
            "exclude" => Ok(EventFilter::Exclude(types)),
            other => Err(format!("unknown event filter mode: {other}")),
        }
    }

    pub fn should_emit(&self, event_type: &EventType) -> bool {
        match self {
            EventFilter::AllowAll => true,
            EventFilter::Include(types) => types.contains(event_type),
            EventFilter::Exclude(types) => !types.contains(event_type),
        }
    }
}

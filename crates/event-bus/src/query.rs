use chrono::{DateTime, Utc};

use crate::EventEnvelope;

/// Filter over the published-event log.
///
/// Allows filtering events by producing aggregate, event name and time range.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Filter by aggregate ID.
    pub aggregate_id: Option<String>,

    /// Filter by aggregate type.
    pub aggregate_type: Option<String>,

    /// Filter by event names (any of these names).
    pub event_names: Option<Vec<String>>,

    /// Filter by events at or after this timestamp.
    pub from_timestamp: Option<DateTime<Utc>>,

    /// Filter by events at or before this timestamp.
    pub to_timestamp: Option<DateTime<Utc>>,

    /// Maximum number of events to return.
    pub limit: Option<usize>,

    /// Number of events to skip.
    pub offset: Option<usize>,
}

impl EventQuery {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for a specific aggregate.
    pub fn for_aggregate(aggregate_id: impl ToString) -> Self {
        Self {
            aggregate_id: Some(aggregate_id.to_string()),
            ..Default::default()
        }
    }

    /// Creates a query for events of a specific name.
    pub fn for_event_name(event_name: impl Into<String>) -> Self {
        Self {
            event_names: Some(vec![event_name.into()]),
            ..Default::default()
        }
    }

    /// Filters by aggregate ID.
    pub fn aggregate_id(mut self, id: impl ToString) -> Self {
        self.aggregate_id = Some(id.to_string());
        self
    }

    /// Filters by aggregate type.
    pub fn aggregate_type(mut self, aggregate_type: impl Into<String>) -> Self {
        self.aggregate_type = Some(aggregate_type.into());
        self
    }

    /// Filters by event name.
    pub fn event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_names = Some(vec![event_name.into()]);
        self
    }

    /// Filters by multiple event names (any of these).
    pub fn event_names(mut self, event_names: Vec<String>) -> Self {
        self.event_names = Some(event_names);
        self
    }

    /// Filters to events at or after this timestamp.
    pub fn from_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.from_timestamp = Some(timestamp);
        self
    }

    /// Filters to events at or before this timestamp.
    pub fn to_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.to_timestamp = Some(timestamp);
        self
    }

    /// Limits the number of events returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips this many events before returning results.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns true if the envelope passes every filter that is set.
    pub fn matches(&self, event: &EventEnvelope) -> bool {
        if let Some(ref id) = self.aggregate_id
            && &event.aggregate_id != id
        {
            return false;
        }
        if let Some(ref agg_type) = self.aggregate_type
            && &event.aggregate_type != agg_type
        {
            return false;
        }
        if let Some(ref names) = self.event_names
            && !names.contains(&event.event_name)
        {
            return false;
        }
        if let Some(from) = self.from_timestamp
            && event.occurred_at < from
        {
            return false;
        }
        if let Some(to) = self.to_timestamp
            && event.occurred_at > to
        {
            return false;
        }
        true
    }

    /// Applies the filters, then offset and limit, preserving input order.
    pub fn apply<'a>(
        &self,
        events: impl IntoIterator<Item = &'a EventEnvelope>,
    ) -> Vec<EventEnvelope> {
        let matching = events
            .into_iter()
            .filter(|e| self.matches(e))
            .skip(self.offset.unwrap_or(0));

        match self.limit {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        }
    }
}

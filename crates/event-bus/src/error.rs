use common::ErrorKind;
use thiserror::Error;

/// A single subscriber that failed while handling a published event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Name reported by the failing handler.
    pub handler: &'static str,

    /// Rendered error returned by the handler.
    pub reason: String,
}

impl std::fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.handler, self.reason)
    }
}

/// Errors that can occur when building or publishing events.
#[derive(Debug, Error)]
pub enum EventBusError {
    /// One or more subscribers failed. The remaining subscribers still ran.
    #[error(
        "{} of {attempted} handlers failed for {event_name}: {}",
        .failures.len(),
        render_failures(.failures)
    )]
    HandlersFailed {
        event_name: String,
        attempted: usize,
        failures: Vec<HandlerFailure>,
    },

    /// An envelope was built without one of its required fields.
    #[error("Incomplete event envelope: missing {0}")]
    IncompleteEnvelope(&'static str),

    /// A payload could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EventBusError {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Infrastructure
    }

    /// Returns the failed handlers, if this is a delivery failure.
    pub fn failures(&self) -> &[HandlerFailure] {
        match self {
            EventBusError::HandlersFailed { failures, .. } => failures,
            _ => &[],
        }
    }
}

fn render_failures(failures: &[HandlerFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for event bus operations.
pub type Result<T> = std::result::Result<T, EventBusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handlers_failed_message_lists_every_failure() {
        let err = EventBusError::HandlersFailed {
            event_name: "CargoRouted".to_string(),
            attempted: 3,
            failures: vec![
                HandlerFailure {
                    handler: "audit",
                    reason: "disk full".to_string(),
                },
                HandlerFailure {
                    handler: "mailer",
                    reason: "timeout".to_string(),
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "2 of 3 handlers failed for CargoRouted: audit: disk full; mailer: timeout"
        );
        assert_eq!(err.failures().len(), 2);
    }
}

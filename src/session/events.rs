//! Session events and observers

use super::{LoadingPurpose, Stage};
use crate::workflow::{Operation, Rejection};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use tracing::info;

/// Something that happened to the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A backend request was dispatched
    RequestStarted { purpose: LoadingPurpose },
    /// A backend request settled; failures still advance the stage
    RequestSettled {
        purpose: LoadingPurpose,
        succeeded: bool,
    },
    /// The visible stage changed
    StageChanged { from: Stage, to: Stage },
    /// An operation was ignored because its preconditions did not hold
    Rejected {
        operation: Operation,
        reason: Rejection,
    },
    /// The review was submitted
    ReviewSubmitted {
        experience_rating: u8,
        quality_rating: u8,
        comment: String,
    },
    /// The session was discarded
    Reset,
}

impl SessionEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            SessionEvent::RequestStarted { purpose } => format!("{purpose} request started"),
            SessionEvent::RequestSettled { purpose, succeeded } => format!(
                "{} request {}",
                purpose,
                if *succeeded { "succeeded" } else { "failed" }
            ),
            SessionEvent::StageChanged { from, to } => format!("Stage {from} -> {to}"),
            SessionEvent::Rejected { operation, reason } => {
                format!("{operation} rejected: {reason}")
            }
            SessionEvent::ReviewSubmitted {
                experience_rating,
                quality_rating,
                ..
            } => format!(
                "Review submitted (experience {experience_rating}/5, quality {quality_rating}/5)"
            ),
            SessionEvent::Reset => "Session reset".to_string(),
        }
    }
}

/// Event with timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedEvent {
    pub timestamp: SystemTime,
    pub event: SessionEvent,
}

impl TimestampedEvent {
    pub fn new(event: SessionEvent) -> Self {
        Self {
            timestamp: SystemTime::now(),
            event,
        }
    }
}

/// Observer for session events
#[async_trait]
pub trait SessionObserver: Send + Sync {
    /// Called after the session has been updated
    async fn on_event(&self, event: &SessionEvent);
}

/// No-op observer implementation
pub struct NoOpObserver;

#[async_trait]
impl SessionObserver for NoOpObserver {
    async fn on_event(&self, _event: &SessionEvent) {}
}

/// Emits every event through `tracing`
pub struct LoggingObserver {
    verbose: bool,
}

impl LoggingObserver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

#[async_trait]
impl SessionObserver for LoggingObserver {
    async fn on_event(&self, event: &SessionEvent) {
        match event {
            SessionEvent::Rejected { .. } if !self.verbose => {}
            SessionEvent::ReviewSubmitted {
                experience_rating,
                quality_rating,
                comment,
            } => {
                info!(
                    experience_rating,
                    quality_rating,
                    comment = comment.as_str(),
                    "{}",
                    event.description()
                );
            }
            _ => info!("{}", event.description()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_descriptions() {
        assert_eq!(
            SessionEvent::RequestStarted {
                purpose: LoadingPurpose::Search
            }
            .description(),
            "search request started"
        );
        assert_eq!(
            SessionEvent::RequestSettled {
                purpose: LoadingPurpose::Drinks,
                succeeded: false
            }
            .description(),
            "drinks request failed"
        );
        assert_eq!(
            SessionEvent::StageChanged {
                from: Stage::Results,
                to: Stage::Steps
            }
            .description(),
            "Stage results -> steps"
        );
        assert_eq!(
            SessionEvent::Rejected {
                operation: Operation::ChooseRecipe,
                reason: Rejection::EmptyRecipeName
            }
            .description(),
            "choose_recipe rejected: recipe name is empty"
        );
    }

    #[tokio::test]
    async fn test_observers_accept_events() {
        let event = SessionEvent::ReviewSubmitted {
            experience_rating: 4,
            quality_rating: 5,
            comment: "great".to_string(),
        };
        NoOpObserver.on_event(&event).await;
        LoggingObserver::new(true).on_event(&event).await;
        LoggingObserver::new(false)
            .on_event(&SessionEvent::Rejected {
                operation: Operation::Search,
                reason: Rejection::Superseded,
            })
            .await;
    }
}

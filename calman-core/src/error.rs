//! Error types for calman.

use thiserror::Error;

use crate::event::EventId;
use crate::validation::ValidationError;

/// Errors that can occur in calman operations.
#[derive(Error, Debug)]
pub enum CalmanError {
    #[error("Invalid event: {0}")]
    Validation(#[from] ValidationError),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("An event with id {0} already exists")]
    DuplicateId(EventId),

    #[error("No event or slot is selected")]
    NoSelection,

    #[error("Draft {draft} does not belong to the selected event {selected}")]
    SelectionMismatch { draft: EventId, selected: EventId },

    #[error("{0} lies outside the selectable date range")]
    OutOfRange(String),

    #[error("Invalid date/time '{0}'. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM")]
    InvalidTime(String),

    #[error("Invalid value for {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calman operations.
pub type CalmanResult<T> = Result<T, CalmanError>;

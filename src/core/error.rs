//! Errors raised by board operations and configuration loading.
//!
//! When a board method returns `Err`, the board is exactly as it was before
//! the call.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Column {0} not found")]
    ColumnNotFound(String),

    #[error("No task at index {index} in column {column_id} (length {len})")]
    TaskIndexOutOfRange {
        column_id: String,
        index: usize,
        len: usize,
    },

    #[error("Task name must not be empty")]
    EmptyTaskName,

    #[error("Drag was cancelled before reaching a drop target")]
    DragCancelled,

    #[error("Drag source {column_id}[{index}] no longer holds task {task_id}")]
    StaleDragSource {
        column_id: String,
        index: usize,
        task_id: String,
    },

    #[error("Task {0} is already being edited")]
    AlreadyEditing(String),

    #[error("Cannot remove the last remaining column")]
    LastColumn,

    #[error("Task id {0} is already in use")]
    DuplicateTaskId(String),

    #[error("Board invariant violated: {0}")]
    Inconsistent(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BoardError {
    /// Declines that are part of normal interaction (a cancelled drag, an
    /// empty form submit) and only deserve debug-level logging.
    pub fn is_expected(&self) -> bool {
        matches!(self, BoardError::DragCancelled | BoardError::EmptyTaskName)
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;

//! Session errors

use thiserror::Error;

use crate::events::EventError;

/// Errors from session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Project identifier must not be empty")]
    EmptyProject,

    #[error("Project switch to {project} abandoned: {source}")]
    SwitchAbandoned {
        project: String,
        #[source]
        source: EventError,
    },
}

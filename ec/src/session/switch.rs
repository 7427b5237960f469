//! Awaitable project switch

use std::future::{self, Future, Ready};
use std::pin::Pin;
use std::task::{Context, Poll};

use tracing::debug;

use super::error::SessionError;
use crate::events::{Once, ProjectContextReady};

enum SwitchState {
    /// Settled without waiting: no-op switch or rejected request
    Settled(Ready<Result<String, SessionError>>),
    /// Store written; waiting for the next `project-context-ready`
    Waiting {
        project: String,
        ready: Once<ProjectContextReady>,
    },
}

/// Future returned by [`SessionContext::request_project_switch`]
///
/// The store write happens when the switch is requested, not when this
/// future is first polled. Resolves with the requested project.
///
/// [`SessionContext::request_project_switch`]: super::SessionContext::request_project_switch
#[must_use = "dropping a project switch does not undo it, but its completion is lost"]
pub struct ProjectSwitch {
    state: SwitchState,
}

impl ProjectSwitch {
    pub(crate) fn settled(result: Result<String, SessionError>) -> Self {
        Self {
            state: SwitchState::Settled(future::ready(result)),
        }
    }

    pub(crate) fn waiting(project: String, ready: Once<ProjectContextReady>) -> Self {
        Self {
            state: SwitchState::Waiting { project, ready },
        }
    }

    /// True if the switch had to wait for a completion signal
    pub fn is_waiting(&self) -> bool {
        matches!(self.state, SwitchState::Waiting { .. })
    }
}

impl Future for ProjectSwitch {
    type Output = Result<String, SessionError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.state {
            SwitchState::Settled(result) => Pin::new(result).poll(cx),
            SwitchState::Waiting { project, ready } => match Pin::new(ready).poll(cx) {
                Poll::Pending => Poll::Pending,
                Poll::Ready(Ok(signal)) => {
                    debug!(%project, signalled = %signal.project, "ProjectSwitch: context ready");
                    Poll::Ready(Ok(std::mem::take(project)))
                }
                Poll::Ready(Err(source)) => Poll::Ready(Err(SessionError::SwitchAbandoned {
                    project: std::mem::take(project),
                    source,
                })),
            },
        }
    }
}

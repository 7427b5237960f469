//! ProjectInitializer - emits `project-context-ready` after project changes
//!
//! Stands in for the part of the application that reloads project-scoped
//! state (tabs, worksheets, connections) when the active project changes.
//! It watches the [`EditorStore`], waits the configured delay, and signals
//! completion on the session's event channel.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::events::{EventChannel, ProjectContextReady};
use crate::stores::EditorStore;

/// Background task owning the re-initialization loop
pub struct ProjectInitializer {
    handle: JoinHandle<()>,
}

impl ProjectInitializer {
    /// Spawn the initializer on the current tokio runtime
    ///
    /// Changes made while a re-initialization is in flight are coalesced: only
    /// the latest project gets the next ready signal.
    pub fn spawn(store: &EditorStore, events: EventChannel, delay: Duration) -> Self {
        let mut rx = store.subscribe();
        debug!(?delay, "ProjectInitializer::spawn: called");

        let handle = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let project = rx.borrow_and_update().clone();
                debug!(%project, "ProjectInitializer: re-initializing");
                tokio::time::sleep(delay).await;
                info!(%project, "Project context ready");
                events.emit(ProjectContextReady { project });
            }
            debug!("ProjectInitializer: store closed");
        });

        Self { handle }
    }

    /// Stop the initializer; pending re-initialization is abandoned
    pub fn shutdown(self) {
        debug!("ProjectInitializer::shutdown: called");
        self.handle.abort();
    }

    /// True once the background task has exited or been aborted
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ProjectInitializer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

//! Active project store

use tokio::sync::watch;
use tracing::debug;

/// Read/write access to the active project identifier
///
/// Writing a new value is expected to kick off project re-initialization
/// elsewhere, which finishes by emitting `project-context-ready`.
pub trait ProjectStore: Send + Sync {
    fn current_project(&self) -> String;

    fn set_current_project(&self, project: &str);
}

/// In-memory editor store backed by a watch channel
///
/// Observers call [`EditorStore::subscribe`] to be woken on project changes.
pub struct EditorStore {
    project: watch::Sender<String>,
}

impl EditorStore {
    pub fn new(initial_project: impl Into<String>) -> Self {
        let initial_project = initial_project.into();
        debug!(%initial_project, "EditorStore::new");
        let (project, _) = watch::channel(initial_project);
        Self { project }
    }

    /// Receive a notification for every project change
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.project.subscribe()
    }
}

impl ProjectStore for EditorStore {
    fn current_project(&self) -> String {
        self.project.borrow().clone()
    }

    fn set_current_project(&self, project: &str) {
        let changed = self.project.send_if_modified(|current| {
            if current.as_str() == project {
                return false;
            }
            *current = project.to_string();
            true
        });
        debug!(%project, changed, "EditorStore::set_current_project");
    }
}

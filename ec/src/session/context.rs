//! SessionContext - shared state for one editor session
//!
//! One context is created when a session view mounts and dropped when it
//! unmounts. Components receive a clone of the handle explicitly; there is no
//! ambient lookup.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};
use uuid::Uuid;

use super::error::SessionError;
use super::state::{AsidePanelTab, PanelState, SchemaViewerTarget};
use super::switch::ProjectSwitch;
use crate::config::SessionConfig;
use crate::events::{EventChannel, ProjectContextReady};
use crate::stores::{DatabaseChangeMode, ObserverId, ProjectStore, WorkspaceSettings};

struct SessionInner {
    id: Uuid,
    panels: Mutex<PanelState>,
    standard_mode: Arc<AtomicBool>,
    events: EventChannel,
    projects: Arc<dyn ProjectStore>,
    settings: Arc<dyn WorkspaceSettings>,
    settings_observer: ObserverId,
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        self.settings.unobserve(self.settings_observer);
        info!(session_id = %self.id, "Session closed");
    }
}

/// Handle to the per-session editor context
///
/// Cheap to clone; every clone refers to the same session.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

fn is_standard_mode(mode: DatabaseChangeMode) -> bool {
    mode == DatabaseChangeMode::Editor
}

impl SessionContext {
    /// Create a session with default panel state
    pub fn new(projects: Arc<dyn ProjectStore>, settings: Arc<dyn WorkspaceSettings>) -> Self {
        Self::with_panels(PanelState::default(), projects, settings)
    }

    /// Create a session with initial panel state taken from config
    pub fn from_config(
        config: &SessionConfig,
        projects: Arc<dyn ProjectStore>,
        settings: Arc<dyn WorkspaceSettings>,
    ) -> Self {
        let panels = PanelState {
            aside_panel_tab: config.aside_panel,
            show_connection_panel: config.show_connection_panel,
            show_ai_chat_box: config.show_ai_chat_box,
            schema_viewer: None,
        };
        Self::with_panels(panels, projects, settings)
    }

    fn with_panels(
        panels: PanelState,
        projects: Arc<dyn ProjectStore>,
        settings: Arc<dyn WorkspaceSettings>,
    ) -> Self {
        let id = Uuid::now_v7();
        let standard_mode = Arc::new(AtomicBool::new(is_standard_mode(settings.database_change_mode())));

        // Observers may change the setting again mid-notification, so the
        // notified value can be stale; the store is the source of truth.
        let flag = Arc::clone(&standard_mode);
        let source = Arc::downgrade(&settings);
        let settings_observer = settings.observe(Box::new(move |notified: DatabaseChangeMode| {
            let Some(settings) = source.upgrade() else {
                return;
            };
            let mode = settings.database_change_mode();
            let enabled = is_standard_mode(mode);
            flag.store(enabled, Ordering::SeqCst);
            debug!(session_id = %id, ?notified, ?mode, enabled, "SessionContext: standard mode recomputed");
        }));

        info!(
            session_id = %id,
            project = %projects.current_project(),
            standard_mode = standard_mode.load(Ordering::SeqCst),
            "Session opened"
        );

        Self {
            inner: Arc::new(SessionInner {
                id,
                panels: Mutex::new(panels),
                standard_mode,
                events: EventChannel::new(),
                projects,
                settings,
                settings_observer,
            }),
        }
    }

    fn panels(&self) -> MutexGuard<'_, PanelState> {
        self.inner.panels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Unique identifier of this session, for log correlation
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// The session's event channel
    pub fn events(&self) -> &EventChannel {
        &self.inner.events
    }

    /// Copy of all panel fields
    pub fn snapshot(&self) -> PanelState {
        self.panels().clone()
    }

    // === Aside panel ===

    pub fn aside_panel_tab(&self) -> AsidePanelTab {
        self.panels().aside_panel_tab
    }

    pub fn set_aside_panel_tab(&self, tab: AsidePanelTab) {
        debug!(session_id = %self.inner.id, %tab, "set_aside_panel_tab: called");
        self.panels().aside_panel_tab = tab;
    }

    // === Overlay panels ===

    pub fn show_connection_panel(&self) -> bool {
        self.panels().show_connection_panel
    }

    pub fn set_show_connection_panel(&self, show: bool) {
        debug!(session_id = %self.inner.id, show, "set_show_connection_panel: called");
        self.panels().show_connection_panel = show;
    }

    /// Flip the connection panel, returning the new value
    pub fn toggle_connection_panel(&self) -> bool {
        let mut panels = self.panels();
        panels.show_connection_panel = !panels.show_connection_panel;
        panels.show_connection_panel
    }

    pub fn show_ai_chat_box(&self) -> bool {
        self.panels().show_ai_chat_box
    }

    pub fn set_show_ai_chat_box(&self, show: bool) {
        debug!(session_id = %self.inner.id, show, "set_show_ai_chat_box: called");
        self.panels().show_ai_chat_box = show;
    }

    /// Flip the assistant panel, returning the new value
    pub fn toggle_ai_chat_box(&self) -> bool {
        let mut panels = self.panels();
        panels.show_ai_chat_box = !panels.show_ai_chat_box;
        panels.show_ai_chat_box
    }

    // === Schema viewer ===

    pub fn schema_viewer(&self) -> Option<SchemaViewerTarget> {
        self.panels().schema_viewer.clone()
    }

    /// Set or clear the inspected object
    ///
    /// Callers clear the target themselves when the database goes away.
    pub fn set_schema_viewer(&self, target: Option<SchemaViewerTarget>) {
        debug!(session_id = %self.inner.id, target = ?target, "set_schema_viewer: called");
        self.panels().schema_viewer = target;
    }

    // === Derived ===

    /// True when the workspace restricts changes to the SQL editor
    ///
    /// Recomputed whenever the workspace setting changes; there is no setter.
    pub fn standard_mode_enabled(&self) -> bool {
        self.inner.standard_mode.load(Ordering::SeqCst)
    }

    // === Project switch ===

    /// Make `project` the active project and wait until its context is ready
    ///
    /// If `project` is already active the returned future is ready at once and
    /// no event is involved. Otherwise the store is written before this call
    /// returns, and the future resolves on the next `project-context-ready`.
    ///
    /// There is no timeout. Overlapping switches all wait on the next ready
    /// signal, so one signal resolves every pending switch even if it belongs
    /// to an earlier target.
    pub fn request_project_switch(&self, project: &str) -> ProjectSwitch {
        if project.is_empty() {
            return ProjectSwitch::settled(Err(SessionError::EmptyProject));
        }

        let current = self.inner.projects.current_project();
        if current == project {
            debug!(session_id = %self.inner.id, %project, "request_project_switch: already active");
            return ProjectSwitch::settled(Ok(project.to_string()));
        }

        // Register first: the store write may trigger the ready signal synchronously
        let ready = self.inner.events.once::<ProjectContextReady>();
        self.inner.projects.set_current_project(project);
        info!(session_id = %self.inner.id, from = %current, to = %project, "Project switch requested");

        ProjectSwitch::waiting(project.to_string(), ready)
    }
}

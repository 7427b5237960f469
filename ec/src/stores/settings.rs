//! Workspace settings source

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// How database changes are made in this workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatabaseChangeMode {
    #[default]
    Unspecified,
    /// Changes go through review pipelines
    Pipeline,
    /// Changes are made directly in the SQL editor
    Editor,
}

/// Callback invoked with the new mode after every change
pub type SettingObserver = Box<dyn Fn(DatabaseChangeMode) + Send + Sync>;

/// Handle for removing an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

/// Workspace-wide settings the session derives state from
pub trait WorkspaceSettings: Send + Sync {
    fn database_change_mode(&self) -> DatabaseChangeMode;

    /// Register `observer`; it runs synchronously on every change
    fn observe(&self, observer: SettingObserver) -> ObserverId;

    fn unobserve(&self, id: ObserverId);
}

#[derive(Default)]
struct SettingState {
    mode: DatabaseChangeMode,
    next_id: u64,
    observers: Vec<(u64, Arc<dyn Fn(DatabaseChangeMode) + Send + Sync>)>,
}

/// In-memory workspace settings
#[derive(Default)]
pub struct SettingStore {
    state: Mutex<SettingState>,
}

impl SettingStore {
    pub fn new(mode: DatabaseChangeMode) -> Self {
        Self {
            state: Mutex::new(SettingState {
                mode,
                ..Default::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SettingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Update the mode and notify observers if it changed
    pub fn set_database_change_mode(&self, mode: DatabaseChangeMode) {
        let observers: Vec<_> = {
            let mut state = self.state();
            if state.mode == mode {
                return;
            }
            state.mode = mode;
            state.observers.iter().map(|(_, observer)| Arc::clone(observer)).collect()
        };

        debug!(?mode, observers = observers.len(), "SettingStore::set_database_change_mode");
        for observer in observers {
            observer(mode);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.state().observers.len()
    }
}

impl WorkspaceSettings for SettingStore {
    fn database_change_mode(&self) -> DatabaseChangeMode {
        self.state().mode
    }

    fn observe(&self, observer: SettingObserver) -> ObserverId {
        let mut state = self.state();
        let id = state.next_id;
        state.next_id += 1;
        state.observers.push((id, Arc::from(observer)));
        ObserverId(id)
    }

    fn unobserve(&self, id: ObserverId) {
        self.state().observers.retain(|(observer_id, _)| *observer_id != id.0);
    }
}

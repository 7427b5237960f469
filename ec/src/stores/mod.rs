//! External collaborators consumed by the session context
//!
//! The session never owns the active project or the workspace settings; it
//! reads and writes them through these traits. In-memory implementations are
//! provided for tests and for the `ec` binary.

mod project;
mod settings;

pub use project::{EditorStore, ProjectStore};
pub use settings::{DatabaseChangeMode, ObserverId, SettingObserver, SettingStore, WorkspaceSettings};

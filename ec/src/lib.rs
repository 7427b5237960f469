//! editorctx - per-session SQL editor context
//!
//! Every editor session owns one [`SessionContext`]: the UI fields that many
//! components share (aside panel, overlay panels, schema viewer target), a
//! standard-mode flag derived from workspace settings, and an
//! [`EventChannel`] that components use to notify each other.
//!
//! # Core Concepts
//!
//! - **Explicit injection**: the context is a cloneable handle passed to each
//!   component, never looked up globally
//! - **Closed event set**: six events with fixed payloads; unknown names do
//!   not compile
//! - **Awaitable project switch**: callers wait for `project-context-ready`,
//!   not just for the store write
//!
//! # Modules
//!
//! - [`events`] - Typed event channel (`emit`, `on`, `once`)
//! - [`session`] - Session context, panel state, project switch
//! - [`stores`] - External project and settings stores
//! - [`initializer`] - Reference project re-initializer
//! - [`script`] - Scripted session replay
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod events;
pub mod initializer;
pub mod script;
pub mod session;
pub mod stores;

// Re-export commonly used types
pub use config::{Config, InitializerConfig, SessionConfig, SwitchConfig};
pub use events::{
    AlterSchema, EditorEvent, EditorTab, EventChannel, EventError, EventKind, EventPayload, FormatContent, Once,
    Position, ProjectContextReady, SaveSheet, SetEditorSelection, Subscription, TreeReady, WorksheetField,
};
pub use initializer::ProjectInitializer;
pub use script::{Script, ScriptReport, Step, run_script};
pub use session::{
    AsidePanelTab, DatabaseRef, PanelState, ProjectSwitch, SchemaViewerTarget, SessionContext, SessionError,
};
pub use stores::{
    DatabaseChangeMode, EditorStore, ObserverId, ProjectStore, SettingObserver, SettingStore, WorkspaceSettings,
};

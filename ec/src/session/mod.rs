//! Per-session editor context
//!
//! [`SessionContext`] owns the UI fields of one editor session, the derived
//! standard-mode flag, and the session's [`EventChannel`]. It also exposes the
//! awaitable project switch.
//!
//! [`EventChannel`]: crate::events::EventChannel

mod context;
mod error;
mod state;
mod switch;

pub use context::SessionContext;
pub use error::SessionError;
pub use state::{AsidePanelTab, DatabaseRef, PanelState, SchemaViewerTarget};
pub use switch::ProjectSwitch;

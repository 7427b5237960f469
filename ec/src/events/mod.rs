//! Typed event channel for cross-component notifications
//!
//! Components inside one editor session talk to each other through this
//! channel instead of holding references to each other. The event set is a
//! closed enum, so subscribing to an unknown name is a compile error.
//!
//! # Usage
//!
//! ```rust,ignore
//! use editorctx::events::{EventChannel, FormatContent, ProjectContextReady};
//!
//! let events = EventChannel::new();
//!
//! // Every occurrence
//! let sub = events.on::<FormatContent, _>(|_| println!("format requested"));
//!
//! // Exactly the next occurrence
//! let ready = events.once::<ProjectContextReady>();
//! events.emit(ProjectContextReady { project: "projects/p1".into() });
//! assert_eq!(ready.await?.project, "projects/p1");
//!
//! sub.unsubscribe();
//! ```

mod channel;
mod error;
mod types;

pub use channel::{EventChannel, Once, Subscription};
pub use error::EventError;
pub use types::{
    AlterSchema, EditorEvent, EditorTab, EventKind, EventPayload, FormatContent, Position, ProjectContextReady,
    SaveSheet, SetEditorSelection, TreeReady, WorksheetField,
};

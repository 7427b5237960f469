//! Event types for editor session notifications
//!
//! The vocabulary is closed: six events, each with a fixed payload shape.
//! - Worksheet actions: `SaveSheet`, `FormatContent`, `SetEditorSelection`
//! - Schema actions: `AlterSchema`, `TreeReady`
//! - Project lifecycle: `ProjectContextReady`

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag identifying one of the six event shapes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    SaveSheet,
    AlterSchema,
    FormatContent,
    TreeReady,
    ProjectContextReady,
    SetEditorSelection,
}

impl EventKind {
    /// All kinds in declaration order
    pub const ALL: [EventKind; 6] = [
        EventKind::SaveSheet,
        EventKind::AlterSchema,
        EventKind::FormatContent,
        EventKind::TreeReady,
        EventKind::ProjectContextReady,
        EventKind::SetEditorSelection,
    ];

    /// Wire name of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::SaveSheet => "save-sheet",
            EventKind::AlterSchema => "alter-schema",
            EventKind::FormatContent => "format-content",
            EventKind::TreeReady => "tree-ready",
            EventKind::ProjectContextReady => "project-context-ready",
            EventKind::SetEditorSelection => "set-editor-selection",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of an editor tab, as carried by a save request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorTab {
    pub id: String,
    pub title: String,
    /// Resource name of the backing worksheet, if the tab was saved before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worksheet: Option<String>,
    #[serde(default)]
    pub statement: String,
}

/// Worksheet fields that a save may update
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorksheetField {
    Title,
    Statement,
    Starred,
    Visibility,
    Database,
}

/// Line/column position inside the editor buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Request to persist a tab as a worksheet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSheet {
    pub tab: EditorTab,
    /// Prompt for a title before saving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_title: Option<bool>,
    /// Restrict the update to these fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<Vec<WorksheetField>>,
}

/// Request to open the schema editor for a table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterSchema {
    /// Format: instances/{instance}/databases/{database}
    pub database_name: String,
    pub schema: String,
    pub table: String,
}

/// Request to reformat the active statement
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatContent {}

/// The schema tree finished loading
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeReady {}

/// Project-scoped state finished re-initializing after a project switch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContextReady {
    pub project: String,
}

/// Move the editor selection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEditorSelection {
    pub start: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Position>,
}

/// Core event enum - every notification exchanged inside one session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EditorEvent {
    SaveSheet(SaveSheet),
    AlterSchema(AlterSchema),
    FormatContent(FormatContent),
    TreeReady(TreeReady),
    ProjectContextReady(ProjectContextReady),
    SetEditorSelection(SetEditorSelection),
}

impl EditorEvent {
    /// Get the tag of this event
    pub fn kind(&self) -> EventKind {
        match self {
            EditorEvent::SaveSheet(_) => EventKind::SaveSheet,
            EditorEvent::AlterSchema(_) => EventKind::AlterSchema,
            EditorEvent::FormatContent(_) => EventKind::FormatContent,
            EditorEvent::TreeReady(_) => EventKind::TreeReady,
            EditorEvent::ProjectContextReady(_) => EventKind::ProjectContextReady,
            EditorEvent::SetEditorSelection(_) => EventKind::SetEditorSelection,
        }
    }

    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// A payload struct that belongs to exactly one [`EditorEvent`] variant
pub trait EventPayload: Clone + Send + Sync + 'static {
    const KIND: EventKind;

    /// Borrow the payload out of an event of the matching kind
    fn from_event(event: &EditorEvent) -> Option<&Self>;
}

macro_rules! impl_payload {
    ($($variant:ident),* $(,)?) => {
        $(
            impl EventPayload for $variant {
                const KIND: EventKind = EventKind::$variant;

                fn from_event(event: &EditorEvent) -> Option<&Self> {
                    match event {
                        EditorEvent::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$variant> for EditorEvent {
                fn from(payload: $variant) -> Self {
                    EditorEvent::$variant(payload)
                }
            }
        )*
    };
}

impl_payload!(
    SaveSheet,
    AlterSchema,
    FormatContent,
    TreeReady,
    ProjectContextReady,
    SetEditorSelection,
);

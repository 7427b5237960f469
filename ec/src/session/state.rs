//! Session UI state
//!
//! Pure data structures. The session context owns one [`PanelState`] and
//! hands out copies; nothing here validates semantics beyond type shape.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which auxiliary panel is displayed next to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AsidePanelTab {
    /// Database object tree
    Schema,
    /// Saved worksheets
    #[default]
    Worksheet,
    /// Query history
    History,
}

impl fmt::Display for AsidePanelTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Schema => "schema",
            Self::Worksheet => "worksheet",
            Self::History => "history",
        };
        f.write_str(name)
    }
}

/// Database resource name: `instances/{instance}/databases/{database}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseRef(String);

impl DatabaseRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Full resource name as given
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Instance segment, if the name is well formed
    pub fn instance(&self) -> Option<&str> {
        self.segments().map(|(instance, _)| instance)
    }

    /// Database segment, if the name is well formed
    pub fn database(&self) -> Option<&str> {
        self.segments().map(|(_, database)| database)
    }

    fn segments(&self) -> Option<(&str, &str)> {
        let rest = self.0.strip_prefix("instances/")?;
        let (instance, database) = rest.split_once("/databases/")?;
        if instance.is_empty() || database.is_empty() || database.contains('/') {
            return None;
        }
        Some((instance, database))
    }
}

impl fmt::Display for DatabaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Object shown in the schema viewer
///
/// `table` without `schema` is accepted; the viewer decides what to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaViewerTarget {
    pub database: DatabaseRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

impl SchemaViewerTarget {
    pub fn database(database: DatabaseRef) -> Self {
        Self {
            database,
            schema: None,
            table: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
}

/// Mutable UI fields of one session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelState {
    pub aside_panel_tab: AsidePanelTab,
    pub show_connection_panel: bool,
    pub show_ai_chat_box: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_viewer: Option<SchemaViewerTarget>,
}

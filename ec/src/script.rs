//! Session scripts - replay UI actions against a live session
//!
//! A script is a YAML list of steps. Each step is one thing a UI component
//! would do: flip a panel, inspect an object, emit an event, switch project.
//!
//! ```yaml
//! - set-panel: schema
//! - toggle-connection-panel
//! - inspect:
//!     database: instances/prod/databases/orders
//!     schema: public
//! - switch-project: projects/beta
//! - emit:
//!     type: format-content
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::events::{EditorEvent, EventKind};
use crate::initializer::ProjectInitializer;
use crate::session::{AsidePanelTab, PanelState, SchemaViewerTarget, SessionContext};
use crate::stores::{DatabaseChangeMode, EditorStore, ProjectStore, SettingStore};

/// One scripted UI action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// Switch project and wait for its context
    SwitchProject(String),
    SetPanel(AsidePanelTab),
    ToggleConnectionPanel,
    ToggleAiChatBox,
    Inspect(SchemaViewerTarget),
    ClearInspection,
    /// Change the workspace setting behind the standard-mode flag
    SetChangeMode(DatabaseChangeMode),
    Emit(EditorEvent),
}

/// Parsed session script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse session script")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read session script {}", path.display()))?;
        let script = Self::parse(&content)?;
        debug!(path = %path.display(), steps = script.steps.len(), "Script::load: loaded");
        Ok(script)
    }
}

/// Outcome of replaying a script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptReport {
    /// Every event emitted during the run, in emission order
    pub events: Vec<EditorEvent>,
    /// Panel fields after the last step
    pub panels: PanelState,
    pub project: String,
    pub standard_mode: bool,
}

/// Replay `script` against a fresh session wired to in-memory stores
///
/// A project switch that does not complete within the configured timeout
/// aborts the run.
pub async fn run_script(script: &Script, config: &Config) -> Result<ScriptReport> {
    let projects = Arc::new(EditorStore::new(config.session.initial_project.clone()));
    let settings = Arc::new(SettingStore::new(config.session.database_change_mode));
    let session = SessionContext::from_config(&config.session, projects.clone(), settings.clone());
    let initializer = ProjectInitializer::spawn(&projects, session.events().clone(), config.initializer.delay());

    let recorded = Arc::new(Mutex::new(Vec::new()));
    for kind in EventKind::ALL {
        let recorded = Arc::clone(&recorded);
        session.events().on_any(kind, move |event| {
            recorded.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
        });
    }

    info!(session_id = %session.id(), steps = script.steps.len(), "Running session script");
    for (index, step) in script.steps.iter().enumerate() {
        debug!(index, ?step, "run_script: step");
        apply_step(&session, &settings, step, config)
            .await
            .context(format!("Step {} failed", index + 1))?;
    }

    initializer.shutdown();
    let events = std::mem::take(&mut *recorded.lock().unwrap_or_else(PoisonError::into_inner));

    Ok(ScriptReport {
        events,
        panels: session.snapshot(),
        project: projects.current_project(),
        standard_mode: session.standard_mode_enabled(),
    })
}

async fn apply_step(session: &SessionContext, settings: &SettingStore, step: &Step, config: &Config) -> Result<()> {
    match step {
        Step::SwitchProject(project) => {
            let timeout = config.switch.timeout();
            match tokio::time::timeout(timeout, session.request_project_switch(project)).await {
                Ok(result) => {
                    let project = result?;
                    info!(%project, "Project switch complete");
                }
                Err(_) => {
                    warn!(%project, ?timeout, "Project switch timed out");
                    return Err(eyre!("Project switch to {} timed out after {:?}", project, timeout));
                }
            }
        }
        Step::SetPanel(tab) => session.set_aside_panel_tab(*tab),
        Step::ToggleConnectionPanel => {
            session.toggle_connection_panel();
        }
        Step::ToggleAiChatBox => {
            session.toggle_ai_chat_box();
        }
        Step::Inspect(target) => session.set_schema_viewer(Some(target.clone())),
        Step::ClearInspection => session.set_schema_viewer(None),
        Step::SetChangeMode(mode) => settings.set_database_change_mode(*mode),
        Step::Emit(event) => session.events().emit(event.clone()),
    }
    Ok(())
}

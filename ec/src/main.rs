//! ec - editor session context driver
//!
//! CLI entry point for replaying session scripts.

use std::fs;
use std::path::Path;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use editorctx::cli::{Cli, Command, get_log_path};
use editorctx::config::Config;
use editorctx::script::{Script, ScriptReport, run_script};

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    let level = match cli_log_level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "editorctx loaded config: initial-project={}, initializer delay={}ms",
        config.session.initial_project, config.initializer.delay_ms
    );

    match cli.command {
        Some(Command::Run { script, project, yaml }) => cmd_run(config, &script, project, yaml).await,
        Some(Command::Config) => cmd_config(&config),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Replay a session script
async fn cmd_run(mut config: Config, script_path: &Path, project: Option<String>, yaml: bool) -> Result<()> {
    if let Some(project) = project {
        config.session.initial_project = project;
    }

    let script = Script::load(script_path)?;
    let report = run_script(&script, &config).await?;

    for event in &report.events {
        println!("{}", serde_json::to_string(event).context("Failed to serialize event")?);
    }

    if yaml {
        print!("{}", serde_yaml::to_string(&report_state(&report))?);
    } else {
        print_report(&report);
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct FinalState<'a> {
    project: &'a str,
    standard_mode: bool,
    #[serde(flatten)]
    panels: &'a editorctx::session::PanelState,
}

fn report_state(report: &ScriptReport) -> FinalState<'_> {
    FinalState {
        project: &report.project,
        standard_mode: report.standard_mode,
        panels: &report.panels,
    }
}

fn print_report(report: &ScriptReport) {
    let on_off = |value: bool| if value { "on".green() } else { "off".dimmed() };

    println!("{}", "Session state".bold());
    println!("  project:           {}", report.project.cyan());
    println!("  standard mode:     {}", on_off(report.standard_mode));
    println!("  aside panel:       {}", report.panels.aside_panel_tab);
    println!("  connection panel:  {}", on_off(report.panels.show_connection_panel));
    println!("  ai chat box:       {}", on_off(report.panels.show_ai_chat_box));
    match &report.panels.schema_viewer {
        Some(target) => {
            let mut inspected = target.database.to_string();
            if let Some(schema) = &target.schema {
                inspected.push_str(&format!(" schema={}", schema));
            }
            if let Some(table) = &target.table {
                inspected.push_str(&format!(" table={}", table));
            }
            println!("  schema viewer:     {}", inspected);
        }
        None => println!("  schema viewer:     {}", "none".dimmed()),
    }
    println!("  events emitted:    {}", report.events.len());
}

/// Print the effective configuration
fn cmd_config(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config")?;
    print!("{}", yaml);
    Ok(())
}

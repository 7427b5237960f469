//! Integration tests for editorctx
//!
//! These tests drive a session the way UI components would: through the
//! context handle and the event channel, with the in-memory stores standing in
//! for the application's stores.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use proptest::prelude::*;

use editorctx::events::{AlterSchema, EventChannel, EventKind, FormatContent, ProjectContextReady, TreeReady};
use editorctx::initializer::ProjectInitializer;
use editorctx::session::{AsidePanelTab, DatabaseRef, SchemaViewerTarget, SessionContext};
use editorctx::stores::{DatabaseChangeMode, EditorStore, ProjectStore, SettingStore};

struct Harness {
    session: SessionContext,
    projects: Arc<EditorStore>,
    settings: Arc<SettingStore>,
}

fn harness(project: &str) -> Harness {
    let projects = Arc::new(EditorStore::new(project));
    let settings = Arc::new(SettingStore::new(DatabaseChangeMode::Pipeline));
    let session = SessionContext::new(projects.clone(), settings.clone());
    Harness {
        session,
        projects,
        settings,
    }
}

fn ready(project: &str) -> ProjectContextReady {
    ProjectContextReady {
        project: project.to_string(),
    }
}

// =============================================================================
// Project switch
// =============================================================================

#[test]
fn test_noop_switch_emits_nothing() {
    let h = harness("projects/a");
    let emitted = Arc::new(Mutex::new(0));
    for kind in EventKind::ALL {
        let emitted = Arc::clone(&emitted);
        h.session.events().on_any(kind, move |_| *emitted.lock().unwrap() += 1);
    }

    let result = h.session.request_project_switch("projects/a").now_or_never();

    assert_eq!(result, Some(Ok("projects/a".to_string())));
    assert_eq!(*emitted.lock().unwrap(), 0);
}

#[test]
fn test_real_switch_waits_for_ready_signal() {
    let h = harness("projects/a");
    let store_at_signal = Arc::new(Mutex::new(None));

    let projects = h.projects.clone();
    let seen = Arc::clone(&store_at_signal);
    h.session
        .events()
        .on::<ProjectContextReady, _>(move |_| *seen.lock().unwrap() = Some(projects.current_project()));

    let mut switch = h.session.request_project_switch("projects/b");
    assert_eq!(h.projects.current_project(), "projects/b");
    assert!((&mut switch).now_or_never().is_none());

    h.session.events().emit(ready("projects/b"));

    assert_eq!(switch.now_or_never(), Some(Ok("projects/b".to_string())));
    assert_eq!(store_at_signal.lock().unwrap().as_deref(), Some("projects/b"));
}

#[tokio::test]
async fn test_switch_with_initializer() {
    let h = harness("projects/a");
    let _init = ProjectInitializer::spawn(&h.projects, h.session.events().clone(), Duration::from_millis(5));

    let project = tokio::time::timeout(Duration::from_secs(2), h.session.request_project_switch("projects/b"))
        .await
        .expect("switch should complete")
        .unwrap();

    assert_eq!(project, "projects/b");
    assert_eq!(h.projects.current_project(), "projects/b");
}

#[tokio::test]
async fn test_switch_without_signal_is_capped_by_caller() {
    let h = harness("projects/a");

    let result = tokio::time::timeout(Duration::from_millis(30), h.session.request_project_switch("projects/b")).await;

    assert!(result.is_err(), "no ready signal means the switch never resolves");
    assert_eq!(h.projects.current_project(), "projects/b");
}

#[tokio::test]
async fn test_switch_from_spawned_task() {
    let h = harness("projects/a");
    let session = h.session.clone();

    let task = tokio::spawn(async move { session.request_project_switch("projects/b").await });
    tokio::task::yield_now().await;

    // Store is written as soon as the task issued the request
    while h.projects.current_project() != "projects/b" {
        tokio::task::yield_now().await;
    }
    h.session.events().emit(ready("projects/b"));

    let result = tokio::time::timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    assert_eq!(result.unwrap(), "projects/b");
}

#[tokio::test]
async fn test_timed_out_switches_release_their_awaiters() {
    let h = harness("projects/a");

    for i in 0..200 {
        let target = format!("projects/p{}", i);
        let result = tokio::time::timeout(Duration::from_millis(1), h.session.request_project_switch(&target)).await;
        assert!(result.is_err());
    }

    assert_eq!(h.projects.current_project(), "projects/p199");
    assert_eq!(h.session.events().listener_count(EventKind::ProjectContextReady), 0);
}

/// Known edge case: overlapping switches are not serialized. Both requests
/// wait on the next ready signal, so the signal for the first target also
/// resolves the second, before the second target's context is ready.
#[test]
fn test_overlapping_switches_share_one_signal() {
    let h = harness("projects/a");

    let first = h.session.request_project_switch("projects/b");
    let second = h.session.request_project_switch("projects/c");
    assert_eq!(h.projects.current_project(), "projects/c");

    h.session.events().emit(ready("projects/b"));

    assert_eq!(first.now_or_never(), Some(Ok("projects/b".to_string())));
    assert_eq!(second.now_or_never(), Some(Ok("projects/c".to_string())));
}

/// Known edge case: a switch requested after the only ready signal already
/// fired keeps waiting, even if that signal named the same project.
#[test]
fn test_switch_after_signal_keeps_waiting() {
    let h = harness("projects/a");

    h.projects.set_current_project("projects/b");
    h.session.events().emit(ready("projects/b"));

    let mut switch = h.session.request_project_switch("projects/c");
    assert!((&mut switch).now_or_never().is_none());
    assert_eq!(h.session.events().listener_count(EventKind::ProjectContextReady), 1);
}

proptest! {
    #[test]
    fn prop_switch_to_current_project_is_immediate(project in "[a-z][a-z0-9-]{0,20}") {
        let h = harness(&project);
        let result = h.session.request_project_switch(&project).now_or_never();

        prop_assert_eq!(result, Some(Ok(project.clone())));
        prop_assert_eq!(h.session.events().listener_count(EventKind::ProjectContextReady), 0);
        prop_assert_eq!(h.projects.current_project(), project);
    }

    #[test]
    fn prop_switch_to_other_project_writes_store(from in "[a-m]{1,8}", to in "[n-z]{1,8}") {
        let h = harness(&from);
        let switch = h.session.request_project_switch(&to);

        prop_assert!(switch.is_waiting());
        prop_assert_eq!(h.projects.current_project(), to.clone());

        h.session.events().emit(ready("anything"));
        prop_assert_eq!(switch.now_or_never(), Some(Ok(to)));
    }
}

// =============================================================================
// Event channel
// =============================================================================

#[tokio::test]
async fn test_once_sees_only_next_emission() {
    let channel = EventChannel::new();

    let first = channel.once::<AlterSchema>();
    channel.emit(AlterSchema {
        database_name: "instances/i/databases/a".to_string(),
        schema: "public".to_string(),
        table: "t1".to_string(),
    });
    let second = channel.once::<AlterSchema>();
    channel.emit(AlterSchema {
        database_name: "instances/i/databases/b".to_string(),
        schema: "public".to_string(),
        table: "t2".to_string(),
    });

    assert_eq!(first.await.unwrap().table, "t1");
    assert_eq!(second.await.unwrap().table, "t2");
}

#[test]
fn test_handlers_run_in_registration_order() {
    let channel = EventChannel::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for name in ["h1", "h2", "h3"] {
        let order = Arc::clone(&order);
        channel.on::<FormatContent, _>(move |_| order.lock().unwrap().push(name));
    }
    channel.emit(FormatContent::default());

    assert_eq!(*order.lock().unwrap(), vec!["h1", "h2", "h3"]);
}

#[test]
fn test_components_communicate_through_session() {
    let h = harness("projects/a");

    // Tree panel reacts to tree-ready by switching the aside panel
    let tree_panel = h.session.clone();
    h.session
        .events()
        .on::<TreeReady, _>(move |_| tree_panel.set_aside_panel_tab(AsidePanelTab::Schema));

    h.session.events().emit(TreeReady::default());
    assert_eq!(h.session.aside_panel_tab(), AsidePanelTab::Schema);
}

// =============================================================================
// Session state
// =============================================================================

#[test]
fn test_overlay_toggles_are_independent() {
    let h = harness("projects/a");

    for _ in 0..3 {
        let ai = h.session.show_ai_chat_box();
        h.session.toggle_connection_panel();
        assert_eq!(h.session.show_ai_chat_box(), ai);

        let conn = h.session.show_connection_panel();
        h.session.toggle_ai_chat_box();
        assert_eq!(h.session.show_connection_panel(), conn);
    }
}

#[test]
fn test_schema_viewer_cleared() {
    let h = harness("projects/a");

    h.session.set_schema_viewer(Some(SchemaViewerTarget::database(DatabaseRef::new(
        "instances/i/databases/d",
    ))));
    h.session.set_schema_viewer(None);

    assert_eq!(h.session.schema_viewer(), None);
}

#[test]
fn test_standard_mode_tracks_setting() {
    let h = harness("projects/a");
    assert!(!h.session.standard_mode_enabled());

    h.settings.set_database_change_mode(DatabaseChangeMode::Editor);
    assert!(h.session.standard_mode_enabled());

    h.settings.set_database_change_mode(DatabaseChangeMode::Unspecified);
    assert!(!h.session.standard_mode_enabled());
}

#[test]
fn test_sessions_are_isolated() {
    let projects = Arc::new(EditorStore::new("projects/a"));
    let settings = Arc::new(SettingStore::default());
    let one = SessionContext::new(projects.clone(), settings.clone());
    let two = SessionContext::new(projects, settings);

    let hits = Arc::new(Mutex::new(0));
    let h = Arc::clone(&hits);
    one.events().on::<TreeReady, _>(move |_| *h.lock().unwrap() += 1);

    two.events().emit(TreeReady::default());
    two.set_show_connection_panel(true);

    assert_eq!(*hits.lock().unwrap(), 0);
    assert!(!one.show_connection_panel());
    assert_ne!(one.id(), two.id());
}

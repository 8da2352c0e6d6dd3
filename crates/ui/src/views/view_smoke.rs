use dioxus::prelude::*;

use datapath_core::model::{
    ContentKind, Difficulty, ItemId, Percentage, ProgressKey, ProgressRecord, ProgressState,
    ProgressStatus, UserStats,
};
use services::Notification;

use super::test_harness::{StubBackend, ViewKind, learner_session, setup_view_harness, topic};
use crate::views::{ContentCard, ProgressPanel, StatTile, ToastMessage};
use crate::vm::{ContentCardVm, ProgressPanelVm, StatTileVm};

fn render_props<P: Clone + 'static>(component: fn(P) -> Element, props: P) -> String {
    let mut dom = VirtualDom::new_with_props(component, props);
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[derive(Props, Clone, PartialEq)]
struct PanelHost {
    vm: ProgressPanelVm,
}

#[allow(non_snake_case)]
fn PanelHostView(props: PanelHost) -> Element {
    rsx! {
        ProgressPanel {
            vm: props.vm,
            busy: false,
            on_action: |_| {},
            on_notes_input: |_| {},
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ToastHost {
    notification: Notification,
}

#[allow(non_snake_case)]
fn ToastHostView(props: ToastHost) -> Element {
    rsx! {
        ToastMessage { notification: props.notification, on_dismiss: |()| {} }
    }
}

fn in_progress(pct: u8, notes: &str) -> ProgressState {
    ProgressState::new(ProgressStatus::InProgress, Percentage::new(pct).unwrap(), notes).unwrap()
}

fn topic_record(id: &str, state: ProgressState) -> ProgressRecord {
    ProgressRecord::new(
        ProgressKey::new(ItemId::new(id).unwrap(), ContentKind::Topic),
        state,
    )
}

#[test]
fn content_card_shows_status_badge_and_paths() {
    let item = topic("t-sql", "SQL Joins", Difficulty::Intermediate);
    let card = ContentCardVm::new(&item, Some(&in_progress(40, "")));
    let html = dioxus_ssr::render_element(rsx! { ContentCard { card } });
    assert!(html.contains("SQL Joins"), "missing title in {html}");
    assert!(html.contains("Intermediate"), "missing difficulty in {html}");
    assert!(html.contains("In progress · 40%"), "missing badge in {html}");
    assert!(html.contains("Data Analyst"), "missing career path in {html}");
}

#[test]
fn stat_tile_renders_value_and_detail() {
    let tile = StatTileVm {
        label: "Topics",
        value: "2/5".into(),
        detail: "1 in progress".into(),
    };
    let html = dioxus_ssr::render_element(rsx! { StatTile { tile } });
    assert!(html.contains("2/5"));
    assert!(html.contains("1 in progress"));
}

#[test]
fn progress_panel_offers_start_for_untouched_item() {
    let html = render_props(
        PanelHostView,
        PanelHost {
            vm: ProgressPanelVm::from(&ProgressState::not_started()),
        },
    );
    assert!(html.contains("Start learning"), "missing start in {html}");
    assert!(!html.contains("progress-slider"), "slider shown in {html}");
    assert!(!html.contains("Mark as complete"));
}

#[test]
fn progress_panel_shows_slider_and_notes_when_started() {
    let html = render_props(
        PanelHostView,
        PanelHost {
            vm: ProgressPanelVm::from(&in_progress(35, "window functions next")),
        },
    );
    assert!(html.contains("35% complete"), "missing percentage in {html}");
    assert!(html.contains("progress-slider"));
    assert!(!html.contains("step="), "slider should move in steps of 1: {html}");
    assert!(html.contains("Mark as complete"));
    assert!(html.contains("window functions next"), "missing notes in {html}");
    assert!(!html.contains("Start learning"));
}

#[test]
fn error_toast_uses_error_style() {
    let html = render_props(
        ToastHostView,
        ToastHost {
            notification: Notification::progress_failed(),
        },
    );
    assert!(html.contains("toast-error"), "missing class in {html}");
    assert!(html.contains("Failed to update progress"));
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_greets_and_lists_in_progress_topics() {
    let backend = StubBackend::new(
        vec![
            topic("t1", "Intro to Data", Difficulty::Beginner),
            topic("t2", "SQL Joins", Difficulty::Intermediate),
        ],
        UserStats {
            total_topics: 2,
            completed_topics: 1,
            in_progress_topics: 1,
            ..UserStats::default()
        },
    )
    .with_progress(vec![topic_record("t2", in_progress(60, ""))]);

    let mut harness = setup_view_harness(ViewKind::Dashboard, backend, Some(learner_session()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Grace!"), "missing greeting in {html}");
    assert!(html.contains("SQL Joins"), "missing continue card in {html}");
    assert!(html.contains("60% complete"));
    assert!(html.contains("50%"), "missing overall percent in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn topic_list_view_renders_count_and_cards() {
    let backend = StubBackend::new(
        vec![
            topic("t1", "Intro to Data", Difficulty::Beginner),
            topic("t2", "SQL Joins", Difficulty::Intermediate),
        ],
        UserStats::default(),
    );
    let mut harness = setup_view_harness(ViewKind::Topics, backend, Some(learner_session()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Showing 2 of 2 topics"), "missing count in {html}");
    assert!(html.contains("Intro to Data"));
    assert!(html.contains("/topics/t2"), "missing detail link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn topic_detail_view_renders_prerequisites_and_start() {
    let backend = StubBackend::new(
        vec![topic("t1", "Intro to Data", Difficulty::Beginner)],
        UserStats::default(),
    );
    let mut harness = setup_view_harness(
        ViewKind::TopicDetail("t1".into()),
        backend,
        Some(learner_session()),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Intro to Data"), "missing title in {html}");
    assert!(html.contains("Prerequisites"));
    assert!(html.contains("Spreadsheets"));
    assert!(html.contains("Start learning"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_topic_shows_not_found() {
    let backend = StubBackend::new(Vec::new(), UserStats::default());
    let mut harness = setup_view_harness(
        ViewKind::TopicDetail("missing".into()),
        backend,
        Some(learner_session()),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Topic not found"), "missing not-found in {html}");
    assert_eq!(harness.backend.progress_len(), 0);
}

use dioxus::prelude::*;
use dioxus_router::Link;

use datapath_core::model::{
    ContentKind, ItemId, Percentage, ProgressAction, ProgressKey, ProgressState, Transition,
};
use services::{ItemDetail, LoadGeneration, Notification};

use crate::context::{AppContext, UiState};
use crate::routes::Route;
use crate::views::dashboard::ProgressBar;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ContentDetailVm, ProgressPanelVm, ResourceLinkVm, queue_action};

#[component]
pub fn TopicDetailView(id: String) -> Element {
    rsx! {
        ContentDetailView { kind: ContentKind::Topic, id }
    }
}

#[component]
pub fn ProjectDetailView(id: String) -> Element {
    rsx! {
        ContentDetailView { kind: ContentKind::Project, id }
    }
}

#[component]
pub fn ContentDetailView(kind: ContentKind, id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_context::<UiState>();
    let loads = use_hook(LoadGeneration::new);

    let teardown = loads.clone();
    use_drop(move || teardown.invalidate());

    let load_ctx = ctx.clone();
    let resource = use_resource(use_reactive((&kind, &id), move |(kind, id)| {
        let content = load_ctx.content();
        let session = ui.current_session();
        let ticket = loads.begin();
        async move {
            let Some(session) = session else {
                return Some(Err(ViewError::Unauthenticated));
            };
            let Ok(item_id) = ItemId::new(id) else {
                return Some(Err(ViewError::NotFound));
            };
            let loaded = ticket.accept(content.load_detail(&session, kind, &item_id).await)?;
            Some(loaded.map_err(|err| {
                ui.notify(Notification::detail_failed(kind));
                ViewError::from(&err)
            }))
        }
    }));

    // Progress shown on the page. Seeded from the load, then rebased onto
    // whatever the server acknowledges.
    let mut progress = use_signal(|| None::<ProgressState>);
    let mut key = use_signal(|| None::<ProgressKey>);
    let mut busy = use_signal(|| false);

    use_effect(move || {
        if let Some(Some(Ok(detail))) = resource.read().as_ref() {
            progress.set(Some(detail.progress.clone()));
            key.set(Some(detail.key()));
        }
    });

    // Actions raised while a write is in flight wait here, folded into one.
    let mut queued = use_signal(|| None::<ProgressAction>);

    let run_action = use_callback(move |action: ProgressAction| {
        if *busy.peek() {
            let pending = queued.peek().clone();
            queued.set(Some(queue_action(pending, action)));
            return;
        }
        let (Some(current), Some(item_key), Some(session)) = (
            progress.peek().clone(),
            key.peek().clone(),
            ui.current_session(),
        ) else {
            return;
        };
        let service = ctx.progress();
        busy.set(true);
        let mut progress = progress;
        let mut busy = busy;
        spawn(async move {
            match service.apply(&session, &item_key, &current, &action).await {
                Ok(outcome) => {
                    if let Some(acked) = outcome.state() {
                        let local = progress.peek().clone().unwrap_or_else(|| current.clone());
                        progress.set(Some(acked.rebase(&current, &local)));
                    }
                    if let Some(notification) = outcome.notification() {
                        ui.notify(notification.clone());
                    }
                }
                Err(err) => {
                    tracing::warn!(item = %item_key.item_id, error = %err, "progress action failed");
                    ui.notify(err.notification());
                }
            }
            busy.set(false);
        });
    });

    use_effect(move || {
        if busy() {
            return;
        }
        let next = queued.write().take();
        if let Some(action) = next {
            run_action.call(action);
        }
    });

    let edit_notes = use_callback(move |text: String| {
        let Some(current) = progress.peek().clone() else {
            return;
        };
        if let Ok(Transition::Local(next)) = current.apply(&ProgressAction::EditNotes(text)) {
            progress.set(Some(next));
        }
    });

    let state = view_state_from_resource(&resource);
    let shown = progress.read().clone();

    rsx! {
        div { class: "content-detail",
            Link { class: "back-link", to: Route::list(kind), "← Back to {kind.plural()}" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(detail) => rsx! {
                    DetailBody {
                        detail: detail.clone(),
                        panel: ProgressPanelVm::from(shown.as_ref().unwrap_or(&detail.progress)),
                        busy: busy(),
                        on_action: move |action| run_action.call(action),
                        on_notes_input: move |text| edit_notes.call(text),
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "empty-state",
                        h2 { "{err.message_for(kind)}" }
                        Link { class: "button", to: Route::list(kind), "Back to {kind.plural()}" }
                    }
                },
            }
        }
    }
}

#[component]
fn DetailBody(
    detail: ItemDetail,
    panel: ProgressPanelVm,
    busy: bool,
    on_action: EventHandler<ProgressAction>,
    on_notes_input: EventHandler<String>,
) -> Element {
    let vm = ContentDetailVm::from(&detail.item);
    let ctx = use_context::<AppContext>();

    rsx! {
        div { class: "detail-layout",
            div { class: "detail-main",
                div { class: "card-head",
                    span { class: "{vm.difficulty_class}", "{vm.difficulty}" }
                    span { class: "muted", "{vm.duration}" }
                }
                h1 { "{vm.title}" }
                p { class: "detail-description", "{vm.description}" }

                if !vm.career_paths.is_empty() {
                    section {
                        h3 { "Career paths" }
                        div { class: "chips",
                            for path in vm.career_paths.iter() {
                                span { key: "{path}", class: "chip", "{path}" }
                            }
                        }
                    }
                }
                if !vm.tags.is_empty() {
                    section {
                        h3 { "{vm.tags_heading}" }
                        ul {
                            for tag in vm.tags.iter() {
                                li { key: "{tag}", "{tag}" }
                            }
                        }
                    }
                }
                if let Some(link) = vm.github_link.clone() {
                    section {
                        h3 { "Repository" }
                        button {
                            class: "button",
                            r#type: "button",
                            onclick: {
                                let opener = ctx.link_opener();
                                move |_| opener.open_url(&link)
                            },
                            "Open on GitHub"
                        }
                    }
                }
                section {
                    h3 { "Resources" }
                    if vm.resources.is_empty() {
                        p { class: "muted", "No resources listed yet." }
                    } else {
                        ul { class: "resource-list",
                            for resource in vm.resources.iter().cloned() {
                                ResourceRow { key: "{resource.url}", resource }
                            }
                        }
                    }
                }
            }
            aside { class: "detail-side",
                ProgressPanel { vm: panel, busy, on_action, on_notes_input }
            }
        }
    }
}

#[component]
fn ResourceRow(resource: ResourceLinkVm) -> Element {
    let ctx = use_context::<AppContext>();
    let opener = ctx.link_opener();
    let url = resource.url.clone();
    rsx! {
        li { class: "resource-row",
            button {
                class: "resource-link",
                r#type: "button",
                onclick: move |_| opener.open_url(&url),
                "{resource.title}"
            }
            span { class: "muted", "{resource.platform}" }
            span { class: "chip", "{resource.access}" }
        }
    }
}

/// Start / slider / complete / notes controls for one item.
#[component]
pub fn ProgressPanel(
    vm: ProgressPanelVm,
    busy: bool,
    on_action: EventHandler<ProgressAction>,
    on_notes_input: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "progress-panel",
            h3 { "Your progress" }
            p { class: "progress-status", "{vm.status_label}" }
            if vm.show_start {
                button {
                    class: "button button-primary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_action.call(ProgressAction::Start),
                    "Start learning"
                }
            }
            if vm.show_slider {
                ProgressBar { percent: vm.percentage }
                label { class: "slider-label", "{vm.percentage}% complete" }
                input {
                    class: "progress-slider",
                    r#type: "range",
                    min: "0",
                    max: "100",
                    disabled: busy,
                    value: "{vm.percentage}",
                    onchange: move |evt| {
                        let parsed = evt.value().parse::<u8>().ok().and_then(|v| Percentage::new(v).ok());
                        if let Some(pct) = parsed {
                            on_action.call(ProgressAction::SetPercentage(pct));
                        }
                    },
                }
            }
            if vm.show_mark_complete {
                button {
                    class: "button",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_action.call(ProgressAction::MarkComplete),
                    "Mark as complete"
                }
            }
            if vm.show_notes {
                label { class: "notes-label", "Notes" }
                textarea {
                    class: "notes",
                    rows: "5",
                    placeholder: "What did you learn? What's next?",
                    value: "{vm.notes}",
                    oninput: move |evt| on_notes_input.call(evt.value()),
                    onblur: move |_| on_action.call(ProgressAction::SaveNotes),
                }
            }
        }
    }
}

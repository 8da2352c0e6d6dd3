use dioxus::prelude::*;
use dioxus_router::Link;

use datapath_core::model::ContentKind;
use services::{LoadGeneration, Notification};

use crate::context::{AppContext, UiState};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ContinueCardVm, DashboardVm, StatTileVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_context::<UiState>();
    let loads = use_hook(LoadGeneration::new);

    let teardown = loads.clone();
    use_drop(move || teardown.invalidate());

    let resource = use_resource(move || {
        let content = ctx.content();
        let session = ui.current_session();
        let ticket = loads.begin();
        async move {
            let Some(session) = session else {
                return Some(Err(ViewError::Unauthenticated));
            };
            let loaded = ticket.accept(content.load_dashboard(&session).await)?;
            Some(match loaded {
                Ok(dashboard) => Ok(map_dashboard(session.user().name(), &dashboard)),
                Err(err) => {
                    ui.notify(Notification::dashboard_failed());
                    Err(ViewError::from(&err))
                }
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        match state {
            ViewState::Idle | ViewState::Loading => rsx! {
                p { "Loading..." }
            },
            ViewState::Ready(vm) => rsx! {
                DashboardBody { vm }
            },
            ViewState::Error(err) => rsx! {
                div { class: "empty-state",
                    p { "{err.message()}" }
                }
            },
        }
    }
}

#[component]
fn DashboardBody(vm: DashboardVm) -> Element {
    rsx! {
        div { class: "dashboard",
            h1 { "{vm.greeting}" }
            div { class: "overall",
                span { "Overall progress" }
                ProgressBar { percent: vm.overall_percent }
                span { class: "overall-value", "{vm.overall_percent}%" }
            }
            div { class: "stat-grid",
                for tile in vm.tiles {
                    StatTile { key: "{tile.label}", tile }
                }
            }
            section { class: "continue",
                h2 { "Continue learning" }
                if vm.continue_learning.is_empty() {
                    p { class: "muted", "Nothing in progress yet. Pick a topic to get started." }
                } else {
                    ul { class: "continue-list",
                        for card in vm.continue_learning {
                            ContinueCard { key: "{card.id}", card }
                        }
                    }
                }
            }
            div { class: "quick-links",
                Link { class: "button", to: Route::list(ContentKind::Topic), "Browse topics" }
                Link { class: "button", to: Route::list(ContentKind::Project), "Browse projects" }
            }
        }
    }
}

#[component]
pub fn StatTile(tile: StatTileVm) -> Element {
    rsx! {
        div { class: "stat-tile",
            span { class: "stat-label", "{tile.label}" }
            span { class: "stat-value", "{tile.value}" }
            span { class: "stat-detail", "{tile.detail}" }
        }
    }
}

#[component]
pub fn ProgressBar(percent: u8) -> Element {
    rsx! {
        div { class: "progress-bar",
            div { class: "progress-fill", style: "width: {percent}%" }
        }
    }
}

#[component]
fn ContinueCard(card: ContinueCardVm) -> Element {
    rsx! {
        li { class: "continue-card",
            Link { to: Route::detail(ContentKind::Topic, card.id.clone()),
                span { class: "continue-title", "{card.title}" }
                ProgressBar { percent: card.percentage }
                span { class: "muted", "{card.percentage}% complete" }
            }
        }
    }
}

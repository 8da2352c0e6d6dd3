use dioxus::prelude::*;
use dioxus_router::Link;

use datapath_core::filter::{ALL_SENTINEL, ContentFilter};
use datapath_core::model::{CareerPath, ContentKind, Difficulty};
use services::{LoadGeneration, Notification};

use crate::context::{AppContext, UiState};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ContentCardVm, map_content_list};

#[component]
pub fn TopicsView() -> Element {
    rsx! {
        ContentListView { kind: ContentKind::Topic }
    }
}

#[component]
pub fn ProjectsView() -> Element {
    rsx! {
        ContentListView { kind: ContentKind::Project }
    }
}

/// Catalog of one kind with search and select filters.
///
/// The collection is fetched once per visit; filtering runs locally on every
/// input change.
#[component]
pub fn ContentListView(kind: ContentKind) -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_context::<UiState>();
    let loads = use_hook(LoadGeneration::new);

    let teardown = loads.clone();
    use_drop(move || teardown.invalidate());

    let mut search = use_signal(String::new);
    let mut difficulty = use_signal(|| ALL_SENTINEL.to_owned());
    let mut career_path = use_signal(|| ALL_SENTINEL.to_owned());

    let resource = use_resource(use_reactive((&kind,), move |(kind,)| {
        let content = ctx.content();
        let session = ui.current_session();
        let ticket = loads.begin();
        async move {
            let Some(session) = session else {
                return Some(Err(ViewError::Unauthenticated));
            };
            let loaded = ticket.accept(content.load_listing(&session, kind).await)?;
            Some(loaded.map_err(|err| {
                ui.notify(Notification::list_failed(kind));
                ViewError::from(&err)
            }))
        }
    }));

    let state = view_state_from_resource(&resource);
    let filter = ContentFilter::new()
        .with_search(search())
        .with_difficulty_value(&difficulty())
        .with_career_path_value(&career_path());

    rsx! {
        div { class: "content-list",
            h1 { "{kind.label()}s" }
            div { class: "filters",
                input {
                    class: "filter-search",
                    r#type: "text",
                    placeholder: "Search {kind.plural()}...",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    class: "filter-select",
                    value: "{difficulty}",
                    onchange: move |evt| difficulty.set(evt.value()),
                    option { value: "{ALL_SENTINEL}", "All levels" }
                    for level in Difficulty::ALL {
                        option { key: "{level}", value: "{level}", "{level}" }
                    }
                }
                select {
                    class: "filter-select",
                    value: "{career_path}",
                    onchange: move |evt| career_path.set(evt.value()),
                    option { value: "{ALL_SENTINEL}", "All career paths" }
                    for path in CareerPath::KNOWN {
                        option { key: "{path}", value: "{path}", "{path}" }
                    }
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(listing) => {
                    let vm = map_content_list(&listing, &filter);
                    rsx! {
                        p { class: "count-label", "{vm.count_label}" }
                        if vm.cards.is_empty() {
                            div { class: "empty-state",
                                p { "No {kind.plural()} match your filters." }
                                if vm.filter_active {
                                    button {
                                        class: "button",
                                        r#type: "button",
                                        onclick: move |_| {
                                            search.set(String::new());
                                            difficulty.set(ALL_SENTINEL.to_owned());
                                            career_path.set(ALL_SENTINEL.to_owned());
                                        },
                                        "Clear filters"
                                    }
                                }
                            }
                        } else {
                            div { class: "card-grid",
                                for card in vm.cards {
                                    Link {
                                        key: "{card.id}",
                                        class: "card-link",
                                        to: Route::detail(kind, card.id.clone()),
                                        ContentCard { card }
                                    }
                                }
                            }
                        }
                    }
                }
                ViewState::Error(err) => rsx! {
                    div { class: "empty-state",
                        p { "{err.message()}" }
                    }
                },
            }
        }
    }
}

#[component]
pub fn ContentCard(card: ContentCardVm) -> Element {
    rsx! {
        article { class: "content-card",
            div { class: "card-head",
                span { class: "{card.difficulty_class}", "{card.difficulty}" }
                if let Some(status) = card.status.as_ref() {
                    span { class: "{status.class}", "{status.label}" }
                }
            }
            h3 { "{card.title}" }
            p { class: "card-description", "{card.description}" }
            div { class: "card-meta",
                span { class: "muted", "{card.duration}" }
                for path in card.career_paths.iter() {
                    span { key: "{path}", class: "chip", "{path}" }
                }
            }
        }
    }
}

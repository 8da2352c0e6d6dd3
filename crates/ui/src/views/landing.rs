use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use datapath_core::model::CareerPath;

use crate::context::{AppContext, UiState};
use crate::routes::{Brand, Route};

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_context::<UiState>();
    let nav = use_navigator();
    let mut pasted = use_signal(String::new);

    // A redirect passed on the command line is handled as if the user had
    // just landed on it.
    let launch_ctx = ctx.clone();
    use_effect(move || {
        if launch_ctx.has_pending_callback() {
            nav.replace(Route::AuthCallback {});
        }
    });

    let submit = use_callback(move |()| {
        let value = pasted.peek().trim().to_owned();
        if value.is_empty() {
            return;
        }
        ctx.set_pending_callback(value);
        pasted.set(String::new());
        nav.push(Route::AuthCallback {});
    });

    let signed_in = ui.session.read().is_some();
    let input_value = pasted();

    rsx! {
        div { class: "landing",
            header { class: "landing-header",
                Brand {}
                if signed_in {
                    Link { class: "button", to: Route::Dashboard {}, "Go to dashboard" }
                }
            }
            section { class: "hero",
                h1 { "Master Data Analytics, Engineering & Science" }
                p {
                    "A structured path through topics and hands-on projects, with progress you can pick up where you left off."
                }
            }
            section { class: "features",
                FeatureCard {
                    title: "Structured topics",
                    body: "From spreadsheets to streaming, ordered by difficulty with curated resources.",
                }
                FeatureCard {
                    title: "Real projects",
                    body: "Build a portfolio with projects mapped to the skills employers ask for.",
                }
                FeatureCard {
                    title: "Track progress",
                    body: "Mark topics as started or complete and keep notes as you go.",
                }
            }
            section { class: "career-paths",
                h2 { "Career paths" }
                ul {
                    for path in CareerPath::KNOWN {
                        li { key: "{path}", "{path}" }
                    }
                }
            }
            section { class: "sign-in",
                h2 { "Sign in" }
                p { "After signing in with your provider, paste the link you were redirected to." }
                div { class: "sign-in-row",
                    input {
                        class: "sign-in-input",
                        r#type: "text",
                        placeholder: "https://…#session_id=…",
                        value: "{input_value}",
                        oninput: move |evt| pasted.set(evt.value()),
                    }
                    button {
                        class: "button button-primary",
                        r#type: "button",
                        disabled: input_value.trim().is_empty(),
                        onclick: move |_| submit.call(()),
                        "Continue"
                    }
                }
            }
        }
    }
}

#[component]
fn FeatureCard(title: &'static str, body: &'static str) -> Element {
    rsx! {
        div { class: "feature-card",
            h3 { "{title}" }
            p { "{body}" }
        }
    }
}

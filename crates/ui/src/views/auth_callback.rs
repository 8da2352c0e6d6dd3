use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::AuthOutcome;

use crate::context::{AppContext, UiState};
use crate::routes::Route;

/// Exchanges the pending redirect fragment and moves on to the dashboard or
/// back to the landing page.
#[component]
pub fn AuthCallbackView() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_context::<UiState>();
    let nav = use_navigator();

    let outcome = use_resource(move || {
        let resolver = ctx.session_resolver();
        let fragment = ctx.take_pending_callback();
        async move {
            match fragment {
                Some(fragment) => resolver.resolve_fragment(&fragment).await,
                None => AuthOutcome::Landing { notification: None },
            }
        }
    });

    use_effect(move || {
        let Some(outcome) = outcome.read().clone() else {
            return;
        };
        match outcome {
            AuthOutcome::Dashboard {
                session,
                notification,
            } => {
                let mut current = ui.session;
                current.set(Some(session));
                ui.notify(notification);
                nav.replace(Route::Dashboard {});
            }
            AuthOutcome::Landing { notification } => {
                if let Some(notification) = notification {
                    ui.notify(notification);
                }
                nav.replace(Route::Landing {});
            }
            AuthOutcome::Pending => {}
        }
    });

    rsx! {
        div { class: "page page-center",
            div { class: "spinner" }
            p { "Authenticating..." }
        }
    }
}

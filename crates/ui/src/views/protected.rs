use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, use_navigator, use_route};

use datapath_core::model::Session;
use services::Access;

use crate::context::{AppContext, UiState};
use crate::routes::{Brand, Route};
use crate::vm::format_date;

/// Layout for every signed-in route. Re-checks the session on each route
/// entry and sends the user to the landing page when it is not accepted.
#[component]
pub fn Protected() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_context::<UiState>();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let access = use_resource(use_reactive((&route,), move |(route,)| {
        let guard = ctx.route_guard();
        async move {
            tracing::debug!(%route, "checking access");
            guard.check().await
        }
    }));

    use_effect(move || {
        let mut session = ui.session;
        match access.read().as_ref() {
            Some(Access::Granted(granted)) => {
                if session.peek().as_ref() != Some(granted) {
                    session.set(Some(granted.clone()));
                }
            }
            Some(Access::Denied) => {
                session.set(None);
                nav.replace(Route::Landing {});
            }
            None => {}
        }
    });

    let granted = matches!(access.read().as_ref(), Some(Access::Granted(_)));
    let session = ui.session.read().clone();

    rsx! {
        match (granted, session) {
            (true, Some(session)) => rsx! {
                SignedInHeader { session }
                div { class: "page",
                    Outlet::<Route> {}
                }
            },
            _ => rsx! {
                div { class: "page page-center",
                    p { "Loading..." }
                }
            },
        }
    }
}

#[component]
fn SignedInHeader(session: Session) -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_context::<UiState>();
    let nav = use_navigator();
    let mut busy = use_signal(|| false);

    let logout_session = session.clone();
    let logout = use_callback(move |()| {
        if *busy.peek() {
            return;
        }
        busy.set(true);
        let resolver = ctx.session_resolver();
        let session = logout_session.clone();
        let mut busy = busy;
        let mut current = ui.session;
        spawn(async move {
            let notification = resolver.logout(&session).await;
            let signed_out = !notification.is_error();
            ui.notify(notification);
            busy.set(false);
            if signed_out {
                current.set(None);
                nav.replace(Route::Landing {});
            }
        });
    });

    let user = session.user();
    let name = user.name().to_owned();
    let until = format_date(session.expires_at());

    rsx! {
        header { class: "topbar",
            Brand {}
            nav { class: "topbar-nav",
                Link { to: Route::Dashboard {}, "Dashboard" }
                Link { to: Route::Topics {}, "Topics" }
                Link { to: Route::Projects {}, "Projects" }
            }
            div { class: "topbar-user",
                if let Some(picture) = user.picture() {
                    img { class: "avatar", src: "{picture}", alt: "{name}" }
                }
                span { class: "user-name", title: "Signed in until {until}", "{name}" }
                button {
                    class: "button",
                    r#type: "button",
                    disabled: busy(),
                    onclick: move |_| logout.call(()),
                    "Logout"
                }
            }
        }
    }
}

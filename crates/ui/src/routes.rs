use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use datapath_core::model::ContentKind;

use crate::views::{
    AuthCallbackView, DashboardView, LandingView, ProjectDetailView, ProjectsView, Protected,
    Toast, TopicDetailView, TopicsView,
};

#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/", LandingView)] Landing {},
        #[route("/auth/callback", AuthCallbackView)] AuthCallback {},
        #[layout(Protected)]
            #[route("/dashboard", DashboardView)] Dashboard {},
            #[route("/topics", TopicsView)] Topics {},
            #[route("/topics/:id", TopicDetailView)] TopicDetail { id: String },
            #[route("/projects", ProjectsView)] Projects {},
            #[route("/projects/:id", ProjectDetailView)] ProjectDetail { id: String },
}

#[component]
fn Shell() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
            Toast {}
        }
    }
}

#[component]
pub fn Brand() -> Element {
    rsx! {
        Link { class: "brand", to: Route::Landing {}, "DataPath Hub" }
    }
}

impl Route {
    #[must_use]
    pub fn list(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Topic => Route::Topics {},
            ContentKind::Project => Route::Projects {},
        }
    }

    #[must_use]
    pub fn detail(kind: ContentKind, id: impl Into<String>) -> Self {
        let id = id.into();
        match kind {
            ContentKind::Topic => Route::TopicDetail { id },
            ContentKind::Project => Route::ProjectDetail { id },
        }
    }
}

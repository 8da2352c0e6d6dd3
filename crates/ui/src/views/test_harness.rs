use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use datapath_core::model::{
    CareerPath, ContentDetails, ContentItem, ContentItemDraft, ContentKind, Difficulty, ItemId,
    ProgressRecord, ProgressUpsert, Session, SessionToken, User, UserId, UserStats,
};
use datapath_core::time::fixed_now;
use services::{ApiError, AppServices, BackendApi, Clock, SessionGrant};
use storage::repository::Storage;

use crate::context::{UiApp, UiState, build_app_context};
use crate::views::{ContentListView, DashboardView, TopicDetailView};

pub fn learner_session() -> Session {
    let user = User::new(
        UserId::new("user-1").unwrap(),
        "grace@example.com",
        "Grace Hopper",
        None,
    )
    .unwrap();
    Session::issue(
        user,
        SessionToken::new("tok-ui").unwrap(),
        fixed_now(),
        Duration::days(7),
    )
    .unwrap()
}

pub fn topic(id: &str, title: &str, difficulty: Difficulty) -> ContentItem {
    ContentItemDraft {
        id: ItemId::new(id).unwrap(),
        title: title.into(),
        description: format!("Learn {title}"),
        difficulty,
        duration: "2 weeks".into(),
        career_paths: vec![CareerPath::new("Data Analyst").unwrap()],
        resources: Vec::new(),
        details: ContentDetails::Topic {
            prerequisites: vec!["Spreadsheets".into()],
            order: 1,
        },
    }
    .validate()
    .unwrap()
}

/// Backend serving a fixed catalog; progress writes are kept in memory.
#[derive(Default)]
pub struct StubBackend {
    topics: Vec<ContentItem>,
    stats: UserStats,
    progress: Mutex<Vec<ProgressRecord>>,
}

impl StubBackend {
    pub fn new(topics: Vec<ContentItem>, stats: UserStats) -> Self {
        Self {
            topics,
            stats,
            progress: Mutex::new(Vec::new()),
        }
    }

    pub fn with_progress(self, records: Vec<ProgressRecord>) -> Self {
        *self.progress.lock().unwrap() = records;
        self
    }

    pub fn progress_len(&self) -> usize {
        self.progress.lock().unwrap().len()
    }
}

#[async_trait]
impl BackendApi for StubBackend {
    async fn exchange_session(&self, _session_id: &str) -> Result<SessionGrant, ApiError> {
        let session = learner_session();
        Ok(SessionGrant {
            user: session.user().clone(),
            token: session.token().clone(),
        })
    }

    async fn current_user(&self, _token: &SessionToken) -> Result<User, ApiError> {
        Ok(learner_session().user().clone())
    }

    async fn logout(&self, _token: &SessionToken) -> Result<(), ApiError> {
        Ok(())
    }

    async fn stats(&self, _token: &SessionToken) -> Result<UserStats, ApiError> {
        Ok(self.stats)
    }

    async fn list_items(&self, kind: ContentKind) -> Result<Vec<ContentItem>, ApiError> {
        Ok(match kind {
            ContentKind::Topic => self.topics.clone(),
            ContentKind::Project => Vec::new(),
        })
    }

    async fn get_item(&self, kind: ContentKind, id: &ItemId) -> Result<ContentItem, ApiError> {
        self.list_items(kind)
            .await?
            .into_iter()
            .find(|item| item.id() == id)
            .ok_or(ApiError::NotFound)
    }

    async fn list_progress(&self, _token: &SessionToken) -> Result<Vec<ProgressRecord>, ApiError> {
        Ok(self.progress.lock().unwrap().clone())
    }

    async fn upsert_progress(
        &self,
        _token: &SessionToken,
        upsert: &ProgressUpsert,
    ) -> Result<ProgressRecord, ApiError> {
        let record = ProgressRecord::new(upsert.key().clone(), upsert.state().clone());
        let mut records = self.progress.lock().unwrap();
        records.retain(|r| r.key() != upsert.key());
        records.push(record.clone());
        Ok(record)
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn session_resolver(&self) -> Arc<services::SessionResolver> {
        self.services.session_resolver()
    }

    fn route_guard(&self) -> Arc<services::RouteGuard> {
        self.services.route_guard()
    }

    fn content(&self) -> Arc<services::ContentService> {
        self.services.content()
    }

    fn progress(&self) -> Arc<services::ProgressService> {
        self.services.progress()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Topics,
    TopicDetail(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session: Option<Session>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    let session = props.session.clone();
    use_context_provider(move || UiState {
        session: Signal::new(session),
        toast: Signal::new(None),
    });
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Topics => rsx! { ContentListView { kind: ContentKind::Topic } },
        ViewKind::TopicDetail(id) => rsx! { TopicDetailView { id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: Arc<StubBackend>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..6 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(
    view: ViewKind,
    backend: StubBackend,
    session: Option<Session>,
) -> ViewHarness {
    let backend = Arc::new(backend);
    let api: Arc<dyn BackendApi> = backend.clone();
    let services = AppServices::from_parts(
        api,
        Storage::in_memory(),
        Clock::fixed(fixed_now()),
        Duration::days(7),
    );
    let app = Arc::new(TestApp { services });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            session,
        },
    );
    ViewHarness { dom, backend }
}

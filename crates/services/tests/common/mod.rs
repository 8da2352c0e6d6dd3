#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::Notify;

use datapath_core::model::{
    CareerPath, ContentDetails, ContentItem, ContentItemDraft, ContentKind, Difficulty, ItemId,
    ProgressRecord, ProgressStatus, ProgressUpsert, Session, SessionToken, User, UserId,
    UserStats,
};
use datapath_core::time::fixed_now;
use services::{ApiError, BackendApi, SessionGrant};

pub const GOOD_SESSION_ID: &str = "sid-good";
pub const GOOD_TOKEN: &str = "tok-good";

pub fn learner() -> User {
    User::new(
        UserId::new("user-1").unwrap(),
        "ada@example.com",
        "Ada",
        None,
    )
    .unwrap()
}

pub fn session_for(token: &str) -> Session {
    Session::issue(
        learner(),
        SessionToken::new(token).unwrap(),
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
            prerequisites: Vec::new(),
            order: 0,
        },
    }
    .validate()
    .unwrap()
}

pub fn project(id: &str, title: &str) -> ContentItem {
    ContentItemDraft {
        id: ItemId::new(id).unwrap(),
        title: title.into(),
        description: format!("Build {title}"),
        difficulty: Difficulty::Intermediate,
        duration: "2-4 weeks".into(),
        career_paths: vec![CareerPath::new("Data Engineer").unwrap()],
        resources: Vec::new(),
        details: ContentDetails::Project {
            skills: vec!["Python".into()],
            github_link: None,
        },
    }
    .validate()
    .unwrap()
}

#[derive(Default)]
struct FakeState {
    topics: Vec<ContentItem>,
    projects: Vec<ContentItem>,
    progress: Vec<ProgressRecord>,
    tokens: HashMap<String, User>,
    fail_upserts: bool,
    fail_logout: bool,
    fail_me: bool,
    exchange_gate: Option<Arc<Notify>>,
    exchange_calls: usize,
    me_calls: usize,
    upsert_calls: usize,
}

/// In-memory stand-in for the DataPath Hub backend.
///
/// Accepts exactly one session id (`GOOD_SESSION_ID`) which grants
/// `GOOD_TOKEN`; any other id is unauthorized.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topics(self, topics: Vec<ContentItem>) -> Self {
        self.state.lock().unwrap().topics = topics;
        self
    }

    pub fn with_projects(self, projects: Vec<ContentItem>) -> Self {
        self.state.lock().unwrap().projects = projects;
        self
    }

    pub fn with_progress(self, progress: Vec<ProgressRecord>) -> Self {
        self.state.lock().unwrap().progress = progress;
        self
    }

    pub fn with_token(self, token: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .tokens
            .insert(token.to_owned(), learner());
        self
    }

    /// Park every exchange until `gate` is notified.
    pub fn with_exchange_gate(self, gate: Arc<Notify>) -> Self {
        self.state.lock().unwrap().exchange_gate = Some(gate);
        self
    }

    pub fn fail_upserts(&self, fail: bool) {
        self.state.lock().unwrap().fail_upserts = fail;
    }

    pub fn fail_logout(&self, fail: bool) {
        self.state.lock().unwrap().fail_logout = fail;
    }

    /// Make `/auth/me` fail with a server error instead of answering.
    pub fn fail_me(&self, fail: bool) {
        self.state.lock().unwrap().fail_me = fail;
    }

    pub fn exchange_calls(&self) -> usize {
        self.state.lock().unwrap().exchange_calls
    }

    pub fn me_calls(&self) -> usize {
        self.state.lock().unwrap().me_calls
    }

    pub fn upsert_calls(&self) -> usize {
        self.state.lock().unwrap().upsert_calls
    }

    pub fn stored_progress(&self) -> Vec<ProgressRecord> {
        self.state.lock().unwrap().progress.clone()
    }

    fn authorize(&self, token: &SessionToken) -> Result<User, ApiError> {
        self.state
            .lock()
            .unwrap()
            .tokens
            .get(token.expose())
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }

    fn items(&self, kind: ContentKind) -> Vec<ContentItem> {
        let state = self.state.lock().unwrap();
        match kind {
            ContentKind::Topic => state.topics.clone(),
            ContentKind::Project => state.projects.clone(),
        }
    }
}

fn count(records: &[ProgressRecord], kind: ContentKind, status: ProgressStatus) -> u32 {
    let n = records
        .iter()
        .filter(|r| r.key().kind == kind && r.state().status() == status)
        .count();
    u32::try_from(n).unwrap()
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn exchange_session(&self, session_id: &str) -> Result<SessionGrant, ApiError> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.exchange_calls += 1;
            state.exchange_gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if session_id != GOOD_SESSION_ID {
            return Err(ApiError::Unauthorized);
        }
        self.state
            .lock()
            .unwrap()
            .tokens
            .insert(GOOD_TOKEN.to_owned(), learner());
        Ok(SessionGrant {
            user: learner(),
            token: SessionToken::new(GOOD_TOKEN).unwrap(),
        })
    }

    async fn current_user(&self, token: &SessionToken) -> Result<User, ApiError> {
        {
            let mut state = self.state.lock().unwrap();
            state.me_calls += 1;
            if state.fail_me {
                return Err(ApiError::HttpStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE));
            }
        }
        self.authorize(token)
    }

    async fn logout(&self, token: &SessionToken) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_logout {
            return Err(ApiError::HttpStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }
        state.tokens.remove(token.expose());
        Ok(())
    }

    async fn stats(&self, token: &SessionToken) -> Result<UserStats, ApiError> {
        self.authorize(token)?;
        let state = self.state.lock().unwrap();
        let records = &state.progress;
        Ok(UserStats {
            total_topics: u32::try_from(state.topics.len()).unwrap(),
            total_projects: u32::try_from(state.projects.len()).unwrap(),
            completed_topics: count(records, ContentKind::Topic, ProgressStatus::Completed),
            completed_projects: count(records, ContentKind::Project, ProgressStatus::Completed),
            in_progress_topics: count(records, ContentKind::Topic, ProgressStatus::InProgress),
            in_progress_projects: count(records, ContentKind::Project, ProgressStatus::InProgress),
        })
    }

    async fn list_items(&self, kind: ContentKind) -> Result<Vec<ContentItem>, ApiError> {
        Ok(self.items(kind))
    }

    async fn get_item(&self, kind: ContentKind, id: &ItemId) -> Result<ContentItem, ApiError> {
        self.items(kind)
            .into_iter()
            .find(|item| item.id() == id)
            .ok_or(ApiError::NotFound)
    }

    async fn list_progress(&self, token: &SessionToken) -> Result<Vec<ProgressRecord>, ApiError> {
        self.authorize(token)?;
        Ok(self.state.lock().unwrap().progress.clone())
    }

    async fn upsert_progress(
        &self,
        token: &SessionToken,
        upsert: &ProgressUpsert,
    ) -> Result<ProgressRecord, ApiError> {
        let user = self.authorize(token)?;
        let mut state = self.state.lock().unwrap();
        state.upsert_calls += 1;
        if state.fail_upserts {
            return Err(ApiError::HttpStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }

        let now = fixed_now();
        let previous = state
            .progress
            .iter()
            .position(|r| r.key() == upsert.key());
        let started_at = previous
            .and_then(|i| state.progress[i].started_at())
            .or(Some(now));
        let completed_at = (upsert.state().status() == ProgressStatus::Completed).then_some(now);
        let record = ProgressRecord::from_persisted(
            upsert.key().clone(),
            Some(user.id().clone()),
            upsert.state().clone(),
            started_at,
            completed_at,
            Some(now),
        );
        match previous {
            Some(i) => state.progress[i] = record.clone(),
            None => state.progress.push(record.clone()),
        }
        Ok(record)
    }
}

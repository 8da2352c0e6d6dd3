use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use datapath_core::model::{
    ContentItem, ContentKind, ItemId, ProgressRecord, ProgressUpsert, SessionToken, User,
    UserStats,
};

use super::wire::{
    ProgressUpsertWire, ProgressWire, ProjectWire, SessionGrantWire, StatsWire, TopicWire,
    UserWire, progress_records,
};
use super::{BackendApi, SessionGrant};
use crate::config::ApiConfig;
use crate::error::ApiError;

const SESSION_ID_HEADER: &str = "X-Session-ID";

/// `BackendApi` over `reqwest`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|err| {
            tracing::warn!(request = what, error = %err, "backend unreachable");
            ApiError::Transport(err)
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(request = what, %status, "backend returned an error status");
        Err(status_error(status, body))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, what).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            tracing::warn!(request = what, error = %err, "could not decode backend payload");
            ApiError::Decode(err.to_string())
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.config.endpoint(path))
    }

    fn authed_get(&self, path: &str, token: &SessionToken) -> RequestBuilder {
        self.get(path).bearer_auth(token.expose())
    }
}

fn status_error(status: StatusCode, body: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        s if s.is_client_error() => ApiError::Rejected { status: s, body },
        s => ApiError::HttpStatus(s),
    }
}

fn item_path(kind: ContentKind, id: &ItemId) -> String {
    format!("{}/{}", kind.plural(), id.as_str())
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn exchange_session(&self, session_id: &str) -> Result<SessionGrant, ApiError> {
        let request = self
            .get("auth/emergent/session")
            .header(SESSION_ID_HEADER, session_id);
        let grant: SessionGrantWire = self.get_json(request, "session exchange").await?;
        let token = grant
            .session_token
            .ok_or_else(|| ApiError::Decode("session exchange returned no token".into()))?;
        Ok(SessionGrant {
            user: grant.user.into_user()?,
            token: SessionToken::new(token)?,
        })
    }

    async fn current_user(&self, token: &SessionToken) -> Result<User, ApiError> {
        let user: UserWire = self
            .get_json(self.authed_get("auth/me", token), "current user")
            .await?;
        user.into_user()
    }

    async fn logout(&self, token: &SessionToken) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.config.endpoint("auth/logout"))
            .bearer_auth(token.expose());
        self.send(request, "logout").await?;
        Ok(())
    }

    async fn stats(&self, token: &SessionToken) -> Result<UserStats, ApiError> {
        let stats: StatsWire = self
            .get_json(self.authed_get("stats", token), "stats")
            .await?;
        Ok(stats.into())
    }

    async fn list_items(&self, kind: ContentKind) -> Result<Vec<ContentItem>, ApiError> {
        let request = self.get(kind.plural());
        match kind {
            ContentKind::Topic => {
                let wire: Vec<TopicWire> = self.get_json(request, "list topics").await?;
                wire.into_iter().map(TopicWire::into_item).collect()
            }
            ContentKind::Project => {
                let wire: Vec<ProjectWire> = self.get_json(request, "list projects").await?;
                wire.into_iter().map(ProjectWire::into_item).collect()
            }
        }
    }

    async fn get_item(&self, kind: ContentKind, id: &ItemId) -> Result<ContentItem, ApiError> {
        let request = self.get(&item_path(kind, id));
        match kind {
            ContentKind::Topic => {
                let wire: TopicWire = self.get_json(request, "get topic").await?;
                wire.into_item()
            }
            ContentKind::Project => {
                let wire: ProjectWire = self.get_json(request, "get project").await?;
                wire.into_item()
            }
        }
    }

    async fn list_progress(&self, token: &SessionToken) -> Result<Vec<ProgressRecord>, ApiError> {
        let wire: Vec<ProgressWire> = self
            .get_json(self.authed_get("progress", token), "list progress")
            .await?;
        Ok(progress_records(wire))
    }

    async fn upsert_progress(
        &self,
        token: &SessionToken,
        upsert: &ProgressUpsert,
    ) -> Result<ProgressRecord, ApiError> {
        let request = self
            .client
            .post(self.config.endpoint("progress"))
            .bearer_auth(token.expose())
            .json(&ProgressUpsertWire::from(upsert));
        let wire: ProgressWire = self.get_json(request, "upsert progress").await?;
        wire.into_record()
    }
}

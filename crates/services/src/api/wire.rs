//! JSON shapes exchanged with the backend and their mapping into domain types.
//!
//! Every wire struct is private to the api module; callers only ever see
//! validated `datapath_core` values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use datapath_core::model::{
    AccessType, CareerPath, ContentDetails, ContentItem, ContentItemDraft, ContentKind, ItemId,
    Percentage, ProgressKey, ProgressRecord, ProgressState, ProgressUpsert, Resource, User,
    UserId, UserStats,
};

use crate::error::ApiError;

//
// ─── AUTH ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct UserWire {
    id: String,
    email: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    picture: Option<String>,
}

impl UserWire {
    pub(crate) fn into_user(self) -> Result<User, ApiError> {
        let id = UserId::new(self.id).map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(User::new(id, self.email, self.name, self.picture)?)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionGrantWire {
    pub(crate) user: UserWire,
    #[serde(default)]
    pub(crate) session_token: Option<String>,
}

//
// ─── CONTENT ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct ResourceWire {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    platform: String,
    #[serde(rename = "type", default)]
    access: String,
}

impl ResourceWire {
    /// Resources are decorative; a broken one is dropped rather than failing
    /// the whole item.
    fn into_resource(self) -> Option<Resource> {
        let access = if self.access.trim().is_empty() {
            AccessType::Free
        } else {
            match self.access.parse() {
                Ok(access) => access,
                Err(err) => {
                    tracing::warn!(title = %self.title, error = %err, "dropping resource");
                    return None;
                }
            }
        };
        match Resource::new(self.title.as_str(), self.platform, access, &self.url) {
            Ok(resource) => Some(resource),
            Err(err) => {
                tracing::warn!(title = %self.title, error = %err, "dropping resource");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopicWire {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    difficulty: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    prerequisites: Vec<String>,
    #[serde(default)]
    career_paths: Vec<String>,
    #[serde(default)]
    resources: Vec<ResourceWire>,
    #[serde(default)]
    order: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectWire {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    difficulty: String,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    resources: Vec<ResourceWire>,
    #[serde(default)]
    github_link: Option<String>,
    #[serde(default = "default_estimated_time")]
    estimated_time: String,
    #[serde(default)]
    career_paths: Vec<String>,
}

fn default_estimated_time() -> String {
    "2-4 weeks".to_owned()
}

fn item_id(raw: String) -> Result<ItemId, ApiError> {
    ItemId::new(raw).map_err(|err| ApiError::Decode(err.to_string()))
}

fn career_paths(raw: Vec<String>) -> Vec<CareerPath> {
    raw.into_iter()
        .filter_map(|path| CareerPath::new(path).ok())
        .collect()
}

fn resources(raw: Vec<ResourceWire>) -> Vec<Resource> {
    raw.into_iter().filter_map(ResourceWire::into_resource).collect()
}

impl TopicWire {
    pub(crate) fn into_item(self) -> Result<ContentItem, ApiError> {
        let draft = ContentItemDraft {
            id: item_id(self.id)?,
            title: self.title,
            description: self.description,
            difficulty: self.difficulty.parse()?,
            duration: self.duration,
            career_paths: career_paths(self.career_paths),
            resources: resources(self.resources),
            details: ContentDetails::Topic {
                prerequisites: self.prerequisites,
                order: self.order,
            },
        };
        Ok(draft.validate()?)
    }
}

impl ProjectWire {
    pub(crate) fn into_item(self) -> Result<ContentItem, ApiError> {
        let github_link = self
            .github_link
            .map(|link| link.trim().to_owned())
            .filter(|link| !link.is_empty());
        let draft = ContentItemDraft {
            id: item_id(self.id)?,
            title: self.title,
            description: self.description,
            difficulty: self.difficulty.parse()?,
            duration: self.estimated_time,
            career_paths: career_paths(self.career_paths),
            resources: resources(self.resources),
            details: ContentDetails::Project {
                skills: self.skills,
                github_link,
            },
        };
        Ok(draft.validate()?)
    }
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressWire {
    #[serde(default)]
    user_id: Option<String>,
    item_id: String,
    item_type: String,
    status: String,
    #[serde(default)]
    progress_percentage: i64,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    started_at: Option<String>,
    #[serde(default)]
    completed_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl ProgressWire {
    pub(crate) fn into_record(self) -> Result<ProgressRecord, ApiError> {
        let kind: ContentKind = self.item_type.parse()?;
        let key = ProgressKey::new(item_id(self.item_id)?, kind);
        let state = ProgressState::from_persisted(
            self.status.parse()?,
            Percentage::from_wire(self.progress_percentage)?,
            self.notes.unwrap_or_default(),
        );
        if !state.is_consistent() {
            tracing::warn!(
                item = %key.item_id,
                status = %state.status(),
                percentage = state.percentage().value(),
                "backend returned inconsistent progress"
            );
        }
        let user_id = self.user_id.and_then(|raw| UserId::new(raw).ok());
        Ok(ProgressRecord::from_persisted(
            key,
            user_id,
            state,
            timestamp(self.started_at),
            timestamp(self.completed_at),
            timestamp(self.updated_at),
        ))
    }
}

/// Map a progress listing, skipping records that do not decode.
///
/// One malformed row must not hide the learner's other progress.
pub(crate) fn progress_records(wire: Vec<ProgressWire>) -> Vec<ProgressRecord> {
    wire.into_iter()
        .filter_map(|row| {
            let item = row.item_id.clone();
            row.into_record()
                .inspect_err(|err| {
                    tracing::warn!(item = %item, error = %err, "skipping malformed progress record");
                })
                .ok()
        })
        .collect()
}

/// The backend writes `isoformat()` strings; anything unparseable is
/// treated as absent.
fn timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(err) => {
            tracing::debug!(value = %raw, error = %err, "ignoring unparseable timestamp");
            None
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProgressUpsertWire<'a> {
    item_id: &'a str,
    item_type: &'static str,
    status: &'static str,
    progress_percentage: u8,
    notes: &'a str,
}

impl<'a> From<&'a ProgressUpsert> for ProgressUpsertWire<'a> {
    fn from(upsert: &'a ProgressUpsert) -> Self {
        let state = upsert.state();
        Self {
            item_id: upsert.key().item_id.as_str(),
            item_type: upsert.key().kind.as_str(),
            status: state.status().as_str(),
            progress_percentage: state.percentage().value(),
            notes: state.notes(),
        }
    }
}

//
// ─── STATS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct StatsWire {
    total_topics: u32,
    total_projects: u32,
    completed_topics: u32,
    completed_projects: u32,
    in_progress_topics: u32,
    in_progress_projects: u32,
}

impl From<StatsWire> for UserStats {
    fn from(wire: StatsWire) -> Self {
        UserStats {
            total_topics: wire.total_topics,
            total_projects: wire.total_projects,
            completed_topics: wire.completed_topics,
            completed_projects: wire.completed_projects,
            in_progress_topics: wire.in_progress_topics,
            in_progress_projects: wire.in_progress_projects,
        }
    }
}

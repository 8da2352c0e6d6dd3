use std::collections::HashMap;
use std::sync::Arc;

use datapath_core::filter::{ContentFilter, count_label};
use datapath_core::model::{
    ContentItem, ContentKind, ItemId, Percentage, ProgressKey, ProgressRecord, ProgressState,
    ProgressStatus, Session, UserStats, find_record,
};

use crate::api::BackendApi;
use crate::error::{ApiError, ContentServiceError};

/// How many in-progress topics the dashboard offers to resume.
pub const CONTINUE_LEARNING_LIMIT: usize = 3;

/// One kind's catalog joined with the user's progress on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentListing {
    kind: ContentKind,
    items: Vec<ContentItem>,
    progress: HashMap<ItemId, ProgressState>,
}

impl ContentListing {
    #[must_use]
    pub fn new(kind: ContentKind, items: Vec<ContentItem>, records: Vec<ProgressRecord>) -> Self {
        let progress = records
            .into_iter()
            .filter(|record| record.key().kind == kind)
            .map(|record| (record.key().item_id.clone(), record.into_state()))
            .collect();
        Self {
            kind,
            items,
            progress,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Progress for `id`, `None` if the user never touched it.
    #[must_use]
    pub fn progress_of(&self, id: &ItemId) -> Option<&ProgressState> {
        self.progress.get(id)
    }

    #[must_use]
    pub fn visible(&self, filter: &ContentFilter) -> Vec<&ContentItem> {
        filter.apply(&self.items)
    }

    #[must_use]
    pub fn count_label(&self, filter: &ContentFilter) -> String {
        count_label(self.visible(filter).len(), self.items.len(), self.kind)
    }
}

/// One item plus the signed-in user's progress on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetail {
    pub item: ContentItem,
    pub progress: ProgressState,
    /// Whether the server already holds a record for this item.
    pub has_record: bool,
}

impl ItemDetail {
    #[must_use]
    pub fn key(&self) -> ProgressKey {
        ProgressKey::new(self.item.id().clone(), self.item.kind())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinueItem {
    pub item: ContentItem,
    pub percentage: Percentage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub stats: UserStats,
    pub continue_learning: Vec<ContinueItem>,
}

/// Read-side loads for the list, detail and dashboard screens.
///
/// Each load joins its requests and fails as a whole; partial data is never
/// returned.
#[derive(Clone)]
pub struct ContentService {
    api: Arc<dyn BackendApi>,
}

impl ContentService {
    #[must_use]
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ContentServiceError` if either the catalog or the progress
    /// request fails.
    pub async fn load_listing(
        &self,
        session: &Session,
        kind: ContentKind,
    ) -> Result<ContentListing, ContentServiceError> {
        let (items, records) = tokio::try_join!(
            self.api.list_items(kind),
            self.api.list_progress(session.token()),
        )
        .inspect_err(|err| tracing::warn!(%kind, error = %err, "listing load failed"))?;
        Ok(ContentListing::new(kind, items, records))
    }

    /// # Errors
    ///
    /// Returns `ContentServiceError` wrapping `ApiError::NotFound` for an
    /// unknown id, or any other request failure.
    pub async fn load_detail(
        &self,
        session: &Session,
        kind: ContentKind,
        id: &ItemId,
    ) -> Result<ItemDetail, ContentServiceError> {
        let (item, records) = tokio::try_join!(
            self.api.get_item(kind, id),
            self.api.list_progress(session.token()),
        )
        .inspect_err(|err| tracing::warn!(%kind, item = %id, error = %err, "detail load failed"))?;

        let key = ProgressKey::new(id.clone(), kind);
        let record = find_record(&records, &key);
        Ok(ItemDetail {
            item,
            has_record: record.is_some(),
            progress: record
                .map(|record| record.state().clone())
                .unwrap_or_default(),
        })
    }

    /// Stats plus up to three in-progress topics to resume, in the order the
    /// server lists the progress records.
    ///
    /// # Errors
    ///
    /// Returns `ContentServiceError` if any request fails.
    pub async fn load_dashboard(&self, session: &Session) -> Result<Dashboard, ContentServiceError> {
        let token = session.token();
        let (stats, records, topics) = tokio::try_join!(
            self.api.stats(token),
            self.api.list_progress(token),
            self.api.list_items(ContentKind::Topic),
        )
        .inspect_err(|err| tracing::warn!(error = %err, "dashboard load failed"))?;

        let resumable = records
            .iter()
            .filter(|record| {
                record.key().kind == ContentKind::Topic
                    && record.state().status() == ProgressStatus::InProgress
            })
            .take(CONTINUE_LEARNING_LIMIT);

        let mut continue_learning = Vec::with_capacity(CONTINUE_LEARNING_LIMIT);
        for record in resumable {
            let id = &record.key().item_id;
            let item = match topics.iter().find(|topic| topic.id() == id) {
                Some(topic) => topic.clone(),
                None => match self.api.get_item(ContentKind::Topic, id).await {
                    Ok(topic) => topic,
                    Err(ApiError::NotFound) => {
                        tracing::debug!(item = %id, "skipping progress for a removed topic");
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                },
            };
            continue_learning.push(ContinueItem {
                item,
                percentage: record.state().percentage(),
            });
        }

        Ok(Dashboard {
            stats,
            continue_learning,
        })
    }
}

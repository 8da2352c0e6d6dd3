use crate::model::ids::ItemId;

use super::{CareerPath, ContentError, ContentKind, Difficulty, Resource};

/// Fields that only one kind of item carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentDetails {
    Topic {
        prerequisites: Vec<String>,
        order: i64,
    },
    Project {
        skills: Vec<String>,
        github_link: Option<String>,
    },
}

impl ContentDetails {
    #[must_use]
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentDetails::Topic { .. } => ContentKind::Topic,
            ContentDetails::Project { .. } => ContentKind::Project,
        }
    }
}

/// A topic or project, authored on the server and read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    id: ItemId,
    title: String,
    description: String,
    difficulty: Difficulty,
    duration: String,
    career_paths: Vec<CareerPath>,
    resources: Vec<Resource>,
    details: ContentDetails,
}

/// Unvalidated input for building a `ContentItem`.
#[derive(Debug, Clone)]
pub struct ContentItemDraft {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub career_paths: Vec<CareerPath>,
    pub resources: Vec<Resource>,
    pub details: ContentDetails,
}

impl ContentItemDraft {
    /// # Errors
    ///
    /// Returns `ContentError::EmptyTitle` if the title is blank.
    pub fn validate(self) -> Result<ContentItem, ContentError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(ContentError::EmptyTitle);
        }

        let mut career_paths = self.career_paths;
        let mut seen = std::collections::HashSet::new();
        career_paths.retain(|path| seen.insert(path.clone()));

        Ok(ContentItem {
            id: self.id,
            title,
            description: self.description.trim().to_owned(),
            difficulty: self.difficulty,
            duration: self.duration.trim().to_owned(),
            career_paths,
            resources: self.resources,
            details: self.details,
        })
    }
}

impl ContentItem {
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.details.kind()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Duration for topics, estimated time for projects.
    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn career_paths(&self) -> &[CareerPath] {
        &self.career_paths
    }

    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    #[must_use]
    pub fn details(&self) -> &ContentDetails {
        &self.details
    }

    #[must_use]
    pub fn prerequisites(&self) -> &[String] {
        match &self.details {
            ContentDetails::Topic { prerequisites, .. } => prerequisites,
            ContentDetails::Project { .. } => &[],
        }
    }

    #[must_use]
    pub fn skills(&self) -> &[String] {
        match &self.details {
            ContentDetails::Project { skills, .. } => skills,
            ContentDetails::Topic { .. } => &[],
        }
    }

    #[must_use]
    pub fn has_career_path(&self, path: &CareerPath) -> bool {
        self.career_paths.iter().any(|p| p == path)
    }
}

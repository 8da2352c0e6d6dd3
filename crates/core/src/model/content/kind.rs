use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ContentError;

/// The two kinds of learning unit tracked by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Topic,
    Project,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Topic, ContentKind::Project];

    /// Wire tag used in progress records (`item_type`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentKind::Topic => "topic",
            ContentKind::Project => "project",
        }
    }

    /// Collection segment in API paths and count labels.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            ContentKind::Topic => "topics",
            ContentKind::Project => "projects",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ContentKind::Topic => "Topic",
            ContentKind::Project => "Project",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topic" => Ok(ContentKind::Topic),
            "project" => Ok(ContentKind::Project),
            other => Err(ContentError::UnknownKind(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s.trim())
            .ok_or_else(|| ContentError::UnknownDifficulty(s.to_owned()))
    }
}

/// Target job role an item is tagged with (e.g. "Data Analyst").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CareerPath(String);

impl CareerPath {
    /// Paths offered by the filter controls.
    pub const KNOWN: [&'static str; 4] = [
        "Data Analyst",
        "Business Analyst",
        "Data Engineer",
        "Data Scientist",
    ];

    /// # Errors
    ///
    /// Returns `ContentError::EmptyCareerPath` if the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ContentError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ContentError::EmptyCareerPath);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn known() -> Vec<CareerPath> {
        Self::KNOWN
            .iter()
            .map(|path| CareerPath((*path).to_owned()))
            .collect()
    }
}

impl fmt::Display for CareerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use std::fmt;
use std::str::FromStr;
use url::Url;

use super::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessType {
    Free,
    Paid,
}

impl AccessType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            AccessType::Free => "FREE",
            AccessType::Paid => "PAID",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccessType {
    type Err = ContentError;

    /// The seed data uses `"FREE"`/`"PAID"`, older entries lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(AccessType::Free),
            "paid" => Ok(AccessType::Paid),
            _ => Err(ContentError::UnknownAccessType(s.to_owned())),
        }
    }
}

/// External learning material attached to one content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    title: String,
    platform: String,
    access: AccessType,
    url: Url,
}

impl Resource {
    /// # Errors
    ///
    /// Returns `ContentError::EmptyTitle` for a blank title and
    /// `ContentError::InvalidResourceUrl` when the URL does not parse.
    pub fn new(
        title: impl Into<String>,
        platform: impl Into<String>,
        access: AccessType,
        url: &str,
    ) -> Result<Self, ContentError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(ContentError::EmptyTitle);
        }
        let url = Url::parse(url.trim())
            .map_err(|_| ContentError::InvalidResourceUrl(url.to_owned()))?;
        Ok(Self {
            title,
            platform: platform.into().trim().to_owned(),
            access,
            url,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    #[must_use]
    pub fn access(&self) -> AccessType {
        self.access
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

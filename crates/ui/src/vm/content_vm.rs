use datapath_core::filter::ContentFilter;
use datapath_core::model::{ContentDetails, ContentItem, Difficulty, ProgressState, ProgressStatus};
use services::ContentListing;

/// CSS modifier for a difficulty badge.
#[must_use]
pub fn difficulty_class(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => "badge badge-beginner",
        Difficulty::Intermediate => "badge badge-intermediate",
        Difficulty::Advanced => "badge badge-advanced",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBadgeVm {
    pub label: String,
    pub class: &'static str,
}

impl StatusBadgeVm {
    /// `None` for untouched items; the card then shows no badge.
    #[must_use]
    pub fn from_state(state: &ProgressState) -> Option<Self> {
        match state.status() {
            ProgressStatus::NotStarted => None,
            ProgressStatus::InProgress => Some(Self {
                label: format!("In progress · {}", state.percentage()),
                class: "status status-in-progress",
            }),
            ProgressStatus::Completed => Some(Self {
                label: "Completed".to_owned(),
                class: "status status-completed",
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentCardVm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub difficulty_class: &'static str,
    pub duration: String,
    pub career_paths: Vec<String>,
    pub status: Option<StatusBadgeVm>,
}

impl ContentCardVm {
    #[must_use]
    pub fn new(item: &ContentItem, progress: Option<&ProgressState>) -> Self {
        Self {
            id: item.id().to_string(),
            title: item.title().to_owned(),
            description: item.description().to_owned(),
            difficulty: item.difficulty().to_string(),
            difficulty_class: difficulty_class(item.difficulty()),
            duration: item.duration().to_owned(),
            career_paths: item
                .career_paths()
                .iter()
                .map(|p| p.as_str().to_owned())
                .collect(),
            status: progress.and_then(StatusBadgeVm::from_state),
        }
    }
}

/// Cards visible under `filter`, plus the "Showing x of y" label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentListVm {
    pub cards: Vec<ContentCardVm>,
    pub count_label: String,
    pub filter_active: bool,
}

#[must_use]
pub fn map_content_list(listing: &ContentListing, filter: &ContentFilter) -> ContentListVm {
    let cards = listing
        .visible(filter)
        .into_iter()
        .map(|item| ContentCardVm::new(item, listing.progress_of(item.id())))
        .collect();
    ContentListVm {
        cards,
        count_label: listing.count_label(filter),
        filter_active: filter.is_active(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceLinkVm {
    pub title: String,
    pub platform: String,
    pub access: &'static str,
    pub url: String,
}

/// Static part of the detail page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentDetailVm {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub difficulty_class: &'static str,
    pub duration: String,
    pub career_paths: Vec<String>,
    /// "Prerequisites" for topics, "Skills" for projects.
    pub tags_heading: &'static str,
    pub tags: Vec<String>,
    pub github_link: Option<String>,
    pub resources: Vec<ResourceLinkVm>,
}

impl From<&ContentItem> for ContentDetailVm {
    fn from(item: &ContentItem) -> Self {
        let (tags_heading, tags, github_link) = match item.details() {
            ContentDetails::Topic { prerequisites, .. } => {
                ("Prerequisites", prerequisites.clone(), None)
            }
            ContentDetails::Project {
                skills,
                github_link,
            } => ("Skills", skills.clone(), github_link.clone()),
        };
        Self {
            title: item.title().to_owned(),
            description: item.description().to_owned(),
            difficulty: item.difficulty().to_string(),
            difficulty_class: difficulty_class(item.difficulty()),
            duration: item.duration().to_owned(),
            career_paths: item
                .career_paths()
                .iter()
                .map(|p| p.as_str().to_owned())
                .collect(),
            tags_heading,
            tags,
            github_link,
            resources: item
                .resources()
                .iter()
                .map(|r| ResourceLinkVm {
                    title: r.title().to_owned(),
                    platform: r.platform().to_owned(),
                    access: r.access().label(),
                    url: r.url().to_string(),
                })
                .collect(),
        }
    }
}

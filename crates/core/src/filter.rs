//! Client-side search and filtering over a fetched content collection.
//!
//! All predicates are independent and combined with AND. Each one can be
//! disabled with the `"all"` sentinel used by the select controls.

use crate::model::{CareerPath, ContentItem, ContentKind, Difficulty};

/// Select value that disables a predicate.
pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    search: String,
    difficulty: Option<Difficulty>,
    career_path: Option<CareerPath>,
}

impl ContentFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring over title and description. The query is
    /// matched as typed; a blank one disables the predicate.
    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.search = if query.trim().is_empty() {
            String::new()
        } else {
            query.to_lowercase()
        };
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_career_path(mut self, career_path: Option<CareerPath>) -> Self {
        self.career_path = career_path;
        self
    }

    /// Apply a difficulty select value. `"all"`, blank or unknown values
    /// disable the predicate.
    #[must_use]
    pub fn with_difficulty_value(self, value: &str) -> Self {
        let difficulty = if is_sentinel(value) {
            None
        } else {
            value.parse().ok()
        };
        self.with_difficulty(difficulty)
    }

    /// Apply a career-path select value. `"all"` or blank disables the predicate.
    #[must_use]
    pub fn with_career_path_value(self, value: &str) -> Self {
        let path = if is_sentinel(value) {
            None
        } else {
            CareerPath::new(value).ok()
        };
        self.with_career_path(path)
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn career_path(&self) -> Option<&CareerPath> {
        self.career_path.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.difficulty.is_some() || self.career_path.is_some()
    }

    #[must_use]
    pub fn matches(&self, item: &ContentItem) -> bool {
        self.matches_search(item) && self.matches_difficulty(item) && self.matches_career(item)
    }

    fn matches_search(&self, item: &ContentItem) -> bool {
        self.search.is_empty()
            || item.title().to_lowercase().contains(&self.search)
            || item.description().to_lowercase().contains(&self.search)
    }

    fn matches_difficulty(&self, item: &ContentItem) -> bool {
        self.difficulty.is_none_or(|d| item.difficulty() == d)
    }

    fn matches_career(&self, item: &ContentItem) -> bool {
        self.career_path
            .as_ref()
            .is_none_or(|path| item.has_career_path(path))
    }

    /// Items passing every predicate, in collection order.
    #[must_use]
    pub fn apply<'a>(&self, items: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

fn is_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL)
}

/// "Showing 1 of 3 topics".
#[must_use]
pub fn count_label(visible: usize, total: usize, kind: ContentKind) -> String {
    format!("Showing {visible} of {total} {}", kind.plural())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentDetails, ContentItemDraft, ItemId};

    fn topic(id: &str, title: &str, difficulty: Difficulty, paths: &[&str]) -> ContentItem {
        ContentItemDraft {
            id: ItemId::new(id).unwrap(),
            title: title.into(),
            description: format!("All about {title}"),
            difficulty,
            duration: "2 weeks".into(),
            career_paths: paths.iter().map(|p| CareerPath::new(*p).unwrap()).collect(),
            resources: Vec::new(),
            details: ContentDetails::Topic {
                prerequisites: Vec::new(),
                order: 0,
            },
        }
        .validate()
        .unwrap()
    }

    fn catalog() -> Vec<ContentItem> {
        vec![
            topic("t1", "Intro to Data", Difficulty::Beginner, &["Data Analyst", "Data Engineer"]),
            topic("t2", "SQL Joins", Difficulty::Intermediate, &["Data Analyst"]),
            topic("t3", "Spark Streaming", Difficulty::Advanced, &["Data Engineer"]),
        ]
    }

    fn ids(items: &[&ContentItem]) -> Vec<String> {
        items.iter().map(|i| i.id().to_string()).collect()
    }

    #[test]
    fn difficulty_filter_shows_single_match() {
        let items = catalog();
        let filter = ContentFilter::new().with_difficulty_value("Intermediate");
        let visible = filter.apply(&items);
        assert_eq!(ids(&visible), ["t2"]);
        assert_eq!(
            count_label(visible.len(), items.len(), ContentKind::Topic),
            "Showing 1 of 3 topics"
        );
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let items = catalog();
        let by_title = ContentFilter::new().with_search("sql");
        assert_eq!(ids(&by_title.apply(&items)), ["t2"]);

        let by_description = ContentFilter::new().with_search("ALL ABOUT spark");
        assert_eq!(ids(&by_description.apply(&items)), ["t3"]);
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        let items = catalog();
        let filter = ContentFilter::new().with_search("Joins ");
        assert_eq!(filter.search(), "joins ");
        assert!(filter.apply(&items).is_empty());

        let inner = ContentFilter::new().with_search("sql j");
        assert_eq!(ids(&inner.apply(&items)), ["t2"]);
    }

    #[test]
    fn sentinel_disables_predicates() {
        let items = catalog();
        let filter = ContentFilter::new()
            .with_difficulty_value("all")
            .with_career_path_value("all")
            .with_search("  ");
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&items).len(), 3);
    }

    #[test]
    fn predicates_compose_in_any_order() {
        let items = catalog();
        let search = ContentFilter::new().with_search("data");
        let difficulty = ContentFilter::new().with_difficulty(Some(Difficulty::Beginner));
        let career = ContentFilter::new().with_career_path_value("Data Engineer");

        let combined = ContentFilter::new()
            .with_search("data")
            .with_difficulty(Some(Difficulty::Beginner))
            .with_career_path_value("Data Engineer");
        let expected = ids(&combined.apply(&items));

        let orders: [[&ContentFilter; 3]; 3] = [
            [&search, &difficulty, &career],
            [&career, &search, &difficulty],
            [&difficulty, &career, &search],
        ];
        for order in orders {
            let mut current: Vec<ContentItem> = items.clone();
            for step in order {
                current = step.apply(&current).into_iter().cloned().collect();
            }
            let got: Vec<String> = current.iter().map(|i| i.id().to_string()).collect();
            assert_eq!(got, expected);
        }
        assert_eq!(expected, ["t1"]);
    }

    #[test]
    fn reapplying_a_filter_changes_nothing() {
        let items = catalog();
        let filter = ContentFilter::new().with_career_path_value("Data Analyst");
        let once: Vec<ContentItem> = filter.apply(&items).into_iter().cloned().collect();
        let twice: Vec<ContentItem> = filter.apply(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }
}

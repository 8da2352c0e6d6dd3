/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total_topics: u32,
    pub total_projects: u32,
    pub completed_topics: u32,
    pub completed_projects: u32,
    pub in_progress_topics: u32,
    pub in_progress_projects: u32,
}

impl UserStats {
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.total_topics.saturating_add(self.total_projects)
    }

    #[must_use]
    pub fn total_completed(&self) -> u32 {
        self.completed_topics.saturating_add(self.completed_projects)
    }

    #[must_use]
    pub fn total_in_progress(&self) -> u32 {
        self.in_progress_topics
            .saturating_add(self.in_progress_projects)
    }

    /// Completed items over all items, rounded to a whole percent.
    ///
    /// Returns 0 when there is no content at all.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn overall_percent(&self) -> u8 {
        let total = self.total_items();
        if total == 0 {
            return 0;
        }
        let completed = self.total_completed().min(total);
        (f64::from(completed) * 100.0 / f64::from(total)).round() as u8
    }
}

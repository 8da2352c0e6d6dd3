use services::Dashboard;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatTileVm {
    pub label: &'static str,
    pub value: String,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinueCardVm {
    pub id: String,
    pub title: String,
    pub percentage: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting: String,
    pub overall_percent: u8,
    pub tiles: Vec<StatTileVm>,
    pub continue_learning: Vec<ContinueCardVm>,
}

#[must_use]
pub fn map_dashboard(user_name: &str, dashboard: &Dashboard) -> DashboardVm {
    let stats = &dashboard.stats;
    let first_name = user_name.split_whitespace().next().unwrap_or(user_name);
    DashboardVm {
        greeting: format!("Welcome back, {first_name}!"),
        overall_percent: stats.overall_percent(),
        tiles: vec![
            StatTileVm {
                label: "Topics",
                value: format!("{}/{}", stats.completed_topics, stats.total_topics),
                detail: format!("{} in progress", stats.in_progress_topics),
            },
            StatTileVm {
                label: "Projects",
                value: format!("{}/{}", stats.completed_projects, stats.total_projects),
                detail: format!("{} in progress", stats.in_progress_projects),
            },
            StatTileVm {
                label: "Completed",
                value: stats.total_completed().to_string(),
                detail: "items finished".to_owned(),
            },
            StatTileVm {
                label: "In progress",
                value: stats.total_in_progress().to_string(),
                detail: "items underway".to_owned(),
            },
        ],
        continue_learning: dashboard
            .continue_learning
            .iter()
            .map(|c| ContinueCardVm {
                id: c.item.id().to_string(),
                title: c.item.title().to_owned(),
                percentage: c.percentage.value(),
            })
            .collect(),
    }
}

mod content_vm;
mod dashboard_vm;
mod progress_vm;
mod time_fmt;

pub use content_vm::{
    ContentCardVm, ContentDetailVm, ContentListVm, ResourceLinkVm, StatusBadgeVm,
    difficulty_class, map_content_list,
};
pub use dashboard_vm::{ContinueCardVm, DashboardVm, StatTileVm, map_dashboard};
pub use progress_vm::{ProgressPanelVm, queue_action};
pub use time_fmt::format_date;

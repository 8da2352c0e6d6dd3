mod auth_callback;
mod content_detail;
mod content_list;
mod dashboard;
mod landing;
mod protected;
mod state;
mod toast;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth_callback::AuthCallbackView;
pub use content_detail::{ContentDetailView, ProgressPanel, ProjectDetailView, TopicDetailView};
pub use content_list::{ContentCard, ContentListView, ProjectsView, TopicsView};
pub use dashboard::{DashboardView, ProgressBar, StatTile};
pub use landing::LandingView;
pub use protected::Protected;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use toast::{Toast, ToastMessage};

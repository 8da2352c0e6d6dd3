pub mod app;
pub mod context;
pub mod platform;
pub mod routes;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::{AppContext, UiApp, UiState, build_app_context};

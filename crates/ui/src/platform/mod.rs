use std::sync::Arc;

mod desktop;

/// Hands external links (course pages, repositories) to the OS browser.
pub trait UiLinkOpener: Send + Sync {
    fn open_url(&self, url: &str);
}

pub type LinkOpenerRef = Arc<dyn UiLinkOpener>;

pub use desktop::DesktopLinkOpener;

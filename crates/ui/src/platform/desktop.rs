use super::UiLinkOpener;

pub struct DesktopLinkOpener;

/// Only web links leave the app; everything else from the backend is ignored.
fn web_link(url: &str) -> Option<&str> {
    let url = url.trim();
    let scheme_ok = ["https://", "http://"]
        .iter()
        .any(|prefix| {
            url.len() > prefix.len()
                && url
                    .get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        });
    scheme_ok.then_some(url)
}

impl UiLinkOpener for DesktopLinkOpener {
    fn open_url(&self, url: &str) {
        let Some(link) = web_link(url) else {
            tracing::warn!(%url, "refusing to open non-http link");
            return;
        };
        // Hands the URL to the OS as a single argument; no shell parses it.
        if let Err(err) = open::that_detached(link) {
            tracing::warn!(url = %link, error = %err, "could not open link");
        }
    }
}

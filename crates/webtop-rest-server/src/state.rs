//! Shared application state

use webtop_automation::SessionManager;

/// State shared by all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Coordinator for the webtop browser session
    pub session: SessionManager,
    /// Webtop URL opened by the initialize route
    pub webtop_url: String,
}

impl AppState {
    pub fn new(webtop_url: impl Into<String>) -> Self {
        Self {
            session: SessionManager::new(),
            webtop_url: webtop_url.into(),
        }
    }
}

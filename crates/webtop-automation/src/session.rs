//! Webtop browser session
//!
//! [`WebtopSession`] owns the Chrome process displaying the webtop page and
//! the active tab. [`SessionManager`] is the single coordinator for that
//! handle: lazily initialized behind an async mutex, so every operation
//! either sees a live session or fails with [`SessionError::NotInitialized`].

use std::sync::Arc;
use std::time::Duration;

use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use webtop_protocol::Viewport;

/// Keep-alive for the CDP connection. The browser library drops idle
/// browsers after 30 seconds by default, which would kill the webtop
/// between tool calls.
const IDLE_BROWSER_TIMEOUT: Duration = Duration::from_secs(86_400);

/// JS evaluated in the page to locate the webtop content on screen.
///
/// `window.screenY` points at the top of the window frame; the chrome
/// height (`outerHeight - innerHeight`) shifts it down to where the page
/// content actually starts.
const VIEWPORT_PROBE: &str = r#"JSON.stringify((() => {
    const rect = document.body.getBoundingClientRect();
    const chromeY = window.outerHeight - window.innerHeight;
    return {
        x: window.screenX + rect.left,
        y: window.screenY + chromeY + rect.top,
        width: rect.width,
        height: rect.height,
    };
})())"#;

/// Errors from browser session operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// No session exists yet
    #[error("Webtop session not initialized. Call initialize first.")]
    NotInitialized,

    /// Browser process failed to start
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// Navigation did not complete
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Any other CDP failure
    #[error("Browser error: {0}")]
    Browser(String),

    /// The viewport probe returned nothing usable
    #[error("Failed to read webtop viewport: {0}")]
    Viewport(String),

    /// The blocking task running the browser call was cancelled
    #[error("Blocking task failed: {0}")]
    Task(String),
}

/// A live browser showing the webtop page
///
/// The browser runs headful: the desktop input engine injects real OS events
/// and needs a visible window to hit.
pub struct WebtopSession {
    // Owns the Chrome process; dropping it kills the browser.
    _browser: Browser,
    tab: Arc<Tab>,
    webtop_url: String,
}

impl WebtopSession {
    /// Launch a headful browser and open the webtop page
    pub fn launch(webtop_url: &str) -> Result<Self, SessionError> {
        info!("Launching browser for webtop at {}", webtop_url);

        let options = LaunchOptionsBuilder::default()
            .headless(false)
            .sandbox(false)
            .idle_browser_timeout(IDLE_BROWSER_TIMEOUT)
            .build()
            .map_err(|e| SessionError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| SessionError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| SessionError::Launch(e.to_string()))?;

        tab.navigate_to(webtop_url)
            .map_err(|e| SessionError::Navigation(e.to_string()))?;
        tab.wait_until_navigated()
            .map_err(|e| SessionError::Navigation(e.to_string()))?;
        tab.activate()
            .map_err(|e| SessionError::Browser(e.to_string()))?;

        info!("Webtop page loaded and focused");
        Ok(Self {
            _browser: browser,
            tab,
            webtop_url: webtop_url.to_string(),
        })
    }

    /// URL the session was opened with
    pub fn webtop_url(&self) -> &str {
        &self.webtop_url
    }

    /// Navigate the tab to a URL and wait for the load to finish
    pub fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| SessionError::Navigation(e.to_string()))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| SessionError::Navigation(e.to_string()))?;
        Ok(())
    }

    /// Title of the current page
    pub fn title(&self) -> Result<String, SessionError> {
        self.tab
            .get_title()
            .map_err(|e| SessionError::Browser(e.to_string()))
    }

    /// URL of the current page
    pub fn current_url(&self) -> String {
        self.tab.get_url()
    }

    /// Raise the webtop window so injected input lands on it
    pub fn bring_to_front(&self) -> Result<(), SessionError> {
        self.tab
            .activate()
            .map_err(|e| SessionError::Browser(e.to_string()))?;
        Ok(())
    }

    /// PNG screenshot of the page via CDP
    pub fn page_screenshot(&self) -> Result<Vec<u8>, SessionError> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| SessionError::Browser(e.to_string()))
    }

    /// Screen rectangle of the webtop page content
    ///
    /// Focuses the window first; the probe reads window positions that are
    /// only meaningful while the window is frontmost.
    pub fn viewport(&self) -> Result<Viewport, SessionError> {
        self.bring_to_front()?;

        let result = self
            .tab
            .evaluate(VIEWPORT_PROBE, false)
            .map_err(|e| SessionError::Viewport(e.to_string()))?;
        let json = result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .ok_or_else(|| SessionError::Viewport("probe returned no value".to_string()))?;

        serde_json::from_str(json).map_err(|e| SessionError::Viewport(e.to_string()))
    }
}

/// Coordinator owning the lazily-initialized webtop session
///
/// All browser calls are blocking CDP round trips, so they run on the
/// blocking thread pool; the mutex serializes operations, one at a time.
#[derive(Clone, Default)]
pub struct SessionManager {
    inner: Arc<Mutex<Option<Arc<WebtopSession>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch the browser and open the webtop page
    ///
    /// Idempotent: when a session already exists the page is brought to the
    /// front instead of launching a second browser.
    pub async fn initialize(&self, webtop_url: &str) -> Result<String, SessionError> {
        let mut guard = self.inner.lock().await;

        if let Some(session) = guard.clone() {
            info!("Webtop session already initialized; bringing page to front");
            run_blocking(move || session.bring_to_front()).await?;
            return Ok("Webtop session already initialized; page brought to front".to_string());
        }

        let url = webtop_url.to_string();
        let session = run_blocking(move || WebtopSession::launch(&url)).await?;
        *guard = Some(Arc::new(session));

        Ok(format!("Webtop session initialized at {webtop_url}"))
    }

    /// Close the browser, if one is running
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        let mut guard = self.inner.lock().await;
        if let Some(session) = guard.take() {
            info!("Shutting down webtop session");
            // Dropping the session kills the Chrome process; do it off the
            // async threads.
            run_blocking(move || {
                drop(session);
                Ok(())
            })
            .await?;
        }
        Ok(())
    }

    /// Whether a session currently exists
    pub async fn is_initialized(&self) -> bool {
        self.inner.lock().await.is_some()
    }

    /// Run a session operation on the blocking pool
    pub async fn run<T, F>(&self, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&WebtopSession) -> Result<T, SessionError> + Send + 'static,
        T: Send + 'static,
    {
        let session = {
            let guard = self.inner.lock().await;
            guard.clone().ok_or(SessionError::NotInitialized)?
        };
        run_blocking(move || f(&session)).await
    }

    /// Navigate to a URL
    pub async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        let url = url.to_string();
        self.run(move |s| s.navigate(&url)).await
    }

    /// Title of the current page
    pub async fn title(&self) -> Result<String, SessionError> {
        self.run(|s| s.title()).await
    }

    /// URL of the current page
    pub async fn current_url(&self) -> Result<String, SessionError> {
        self.run(|s| Ok(s.current_url())).await
    }

    /// Raise the webtop window
    pub async fn bring_to_front(&self) -> Result<(), SessionError> {
        self.run(|s| s.bring_to_front()).await
    }

    /// PNG screenshot of the webtop page
    pub async fn page_screenshot(&self) -> Result<Vec<u8>, SessionError> {
        self.run(|s| s.page_screenshot()).await
    }

    /// Screen rectangle of the webtop page content
    pub async fn viewport(&self) -> Result<Viewport, SessionError> {
        self.run(|s| s.viewport()).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, SessionError>
where
    F: FnOnce() -> Result<T, SessionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| SessionError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_operations_require_initialization() {
        let manager = SessionManager::new();
        assert!(!manager.is_initialized().await);

        let err = manager.navigate("http://localhost:3000/").await.unwrap_err();
        assert!(matches!(err, SessionError::NotInitialized));

        let err = manager.viewport().await.unwrap_err();
        assert!(matches!(err, SessionError::NotInitialized));

        let err = manager.page_screenshot().await.unwrap_err();
        assert!(matches!(err, SessionError::NotInitialized));
    }

    #[tokio::test]
    async fn test_shutdown_without_session_is_ok() {
        let manager = SessionManager::new();
        assert!(manager.shutdown().await.is_ok());
        assert!(!manager.is_initialized().await);
    }

    #[test]
    fn test_not_initialized_message() {
        assert!(
            SessionError::NotInitialized
                .to_string()
                .contains("not initialized")
        );
    }

    #[test]
    fn test_viewport_probe_shape() {
        // The probe must produce exactly the fields Viewport deserializes.
        let sample = r#"{"x":10.0,"y":97.5,"width":1280.0,"height":720.0}"#;
        let vp: Viewport = serde_json::from_str(sample).unwrap();
        assert_eq!(vp.width, 1280.0);
        for field in ["x", "y", "width", "height"] {
            assert!(VIEWPORT_PROBE.contains(field));
        }
    }
}

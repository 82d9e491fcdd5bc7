//! The rendering-service boundary.
//!
//! The driver talks to the page through this trait and nothing else: no
//! network calls, no protocol logic. The production implementation is
//! [`crate::chrome::ChromeSession`]; tests drive the loop with scripted
//! in-memory sessions.

use std::time::Duration;

use crate::error::ScrapeError;
use crate::node::ListingNode;

/// One rendered browser page, owned serially by the driver loop.
///
/// All methods are synchronous: the underlying browser session is a single
/// serial resource and pagination must observe pages in strict order.
pub trait BrowserSession {
    /// Navigates to `url` and waits for the navigation to settle.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Transport`] when the underlying service fails
    /// (connection drop, browser crash, navigation refused).
    fn load(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// The page's current URL as the browser reports it, after any redirects.
    fn current_url(&self) -> String;

    /// Waits up to `timeout` for at least one element matching `selector`.
    ///
    /// Returns `Ok(false)` on timeout — for listing containers that is the
    /// natural end of pagination, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Transport`] when the wait cannot be issued at
    /// all.
    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool, ScrapeError>;

    /// Snapshots every element matching `selector` into owned, parsed nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Transport`] when the query fails.
    fn listing_nodes(&mut self, selector: &str) -> Result<Vec<ListingNode>, ScrapeError>;

    /// Whether the rendered page contains `literal` anywhere in its HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Transport`] when the page content cannot be
    /// read.
    fn page_contains(&mut self, literal: &str) -> Result<bool, ScrapeError>;
}

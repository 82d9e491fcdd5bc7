//! Production [`BrowserSession`] backed by Chrome over the DevTools protocol.
//!
//! Review directories render their listings client-side and front them with
//! bot checks, so a plain HTTP fetch sees nothing useful. This session either
//! attaches to an already-running browser over its DevTools WebSocket (the
//! usual setup: a hardened remote browser service holds the anti-bot state)
//! or launches a local headless Chrome as a fallback for development.

use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};

use crate::browser::BrowserSession;
use crate::error::ScrapeError;
use crate::node::ListingNode;

/// A single Chrome tab driven serially by the pagination loop.
pub struct ChromeSession {
    // Dropping the browser closes the tab; keep both alive together.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Attaches to a running browser over its DevTools WebSocket URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Transport`] when the connection or tab creation
    /// fails.
    pub fn connect(ws_url: &str, page_load_timeout: Duration) -> Result<Self, ScrapeError> {
        let browser =
            Browser::connect(ws_url.to_owned()).map_err(|e| transport("connect", &e))?;
        Self::with_browser(browser, page_load_timeout)
    }

    /// Launches a local headless Chrome.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Transport`] when Chrome cannot be started.
    pub fn launch(page_load_timeout: Duration) -> Result<Self, ScrapeError> {
        let browser = Browser::new(LaunchOptions {
            headless: true,
            window_size: Some((1920, 1080)),
            args: vec![
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-blink-features=AutomationControlled"),
            ],
            ..Default::default()
        })
        .map_err(|e| transport("launch", &e))?;
        Self::with_browser(browser, page_load_timeout)
    }

    fn with_browser(browser: Browser, page_load_timeout: Duration) -> Result<Self, ScrapeError> {
        let tab = browser.new_tab().map_err(|e| transport("new_tab", &e))?;
        tab.set_default_timeout(page_load_timeout);
        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

impl BrowserSession for ChromeSession {
    fn load(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| transport("navigate", &e))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| transport("navigation wait", &e))?;
        Ok(())
    }

    fn current_url(&self) -> String {
        self.tab.get_url()
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool, ScrapeError> {
        // The crate reports a wait timeout as an error, but a timeout is an
        // answer here, not a failure. A dead session also surfaces as a wait
        // error, so distinguish the two: if the tab cannot even serve its
        // content any more, the transport is gone.
        match self
            .tab
            .wait_for_element_with_custom_timeout(selector, timeout)
        {
            Ok(_) => Ok(true),
            Err(e) => {
                if self.tab.get_content().is_err() {
                    return Err(transport("element wait", &e));
                }
                tracing::debug!(selector, error = %e, "element wait ended without a match");
                Ok(false)
            }
        }
    }

    fn listing_nodes(&mut self, selector: &str) -> Result<Vec<ListingNode>, ScrapeError> {
        let elements = self
            .tab
            .find_elements(selector)
            .map_err(|e| transport("element query", &e))?;
        let mut nodes = Vec::with_capacity(elements.len());
        for element in elements {
            let html = element
                .get_content()
                .map_err(|e| transport("element content", &e))?;
            nodes.push(ListingNode::from_html(&html));
        }
        Ok(nodes)
    }

    fn page_contains(&mut self, literal: &str) -> Result<bool, ScrapeError> {
        let content = self
            .tab
            .get_content()
            .map_err(|e| transport("page content", &e))?;
        Ok(content.contains(literal))
    }
}

fn transport(context: &str, error: &anyhow::Error) -> ScrapeError {
    ScrapeError::Transport {
        context: context.to_owned(),
        message: error.to_string(),
    }
}

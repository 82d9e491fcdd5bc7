//! The pagination driver: a single-threaded finite loop over listing pages.
//!
//! Each iteration fetches one explicitly-constructed page URL, snapshots its
//! listing containers, extracts and deduplicates records, then decides
//! whether to advance. Fetch, extraction, and advance never overlap — the
//! browser session is one serial resource.
//!
//! The loop is an explicit state machine:
//!
//! ```text
//! Fetching ──listings──▶ Extracting ──▶ Advancing ──▶ Fetching
//!    │                        │              │
//!    │ timeout/empty          │ item cap     │ page cap / marker /
//!    │ revisited URL          ▼              │ no new listings
//!    ├──────────────────▶   Done   ◀─────────┘
//!    │
//!    └──transport / denied──▶ Failed
//! ```
//!
//! A listing-wait timeout on the very first page is fatal (the category URL
//! is wrong or the site is blocking us); the same timeout on a later page is
//! the natural end of pagination. Either way, everything accumulated so far
//! is handed back to the caller.

use std::collections::HashSet;
use std::time::Duration;

use revdir_core::ListingRecord;

use crate::browser::BrowserSession;
use crate::error::ScrapeError;
use crate::extract::extract_listing;
use crate::node::ListingNode;
use crate::pagination::{canonicalize, page_url};
use crate::profile::SiteProfile;

/// Transient per-run state: cursor, caps, dedup sets, accumulated records.
///
/// Created at run start, mutated once per page iteration, consumed by
/// [`PaginationDriver::run`]. Nothing survives between runs.
pub struct ScrapeSession {
    start_url: String,
    /// 1-based page cursor.
    page: u32,
    /// Page cap; 0 = unlimited.
    max_pages: usize,
    /// Item cap; 0 = unlimited.
    max_items: usize,
    seen_keys: HashSet<String>,
    visited_urls: HashSet<String>,
    records: Vec<ListingRecord>,
    pages_visited: usize,
}

impl ScrapeSession {
    /// Creates a session starting at `start_page` (clamped to ≥ 1) of
    /// `start_url`. A cap of `0` means unlimited.
    #[must_use]
    pub fn new(start_url: impl Into<String>, start_page: u32, max_pages: usize, max_items: usize) -> Self {
        Self {
            start_url: start_url.into(),
            page: start_page.max(1),
            max_pages,
            max_items,
            seen_keys: HashSet::new(),
            visited_urls: HashSet::new(),
            records: Vec::new(),
            pages_visited: 0,
        }
    }

    fn item_cap_reached(&self) -> bool {
        self.max_items > 0 && self.records.len() >= self.max_items
    }

    fn page_cap_reached(&self) -> bool {
        self.max_pages > 0 && self.pages_visited >= self.max_pages
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No listing containers appeared on a page past the first.
    EndOfListings,
    /// A page rendered, but every listing on it was already seen.
    NoNewListings,
    /// The page resolved to a URL already visited this run.
    RepeatedUrl,
    /// The configured page cap was reached.
    MaxPages,
    /// The configured item cap was reached.
    MaxItems,
    /// The site's "no results" marker was present.
    NoResultsMarker,
    /// The run aborted; see [`ScrapeOutcome::failure`].
    Failed,
}

impl StopReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EndOfListings => "end_of_listings",
            Self::NoNewListings => "no_new_listings",
            Self::RepeatedUrl => "repeated_url",
            Self::MaxPages => "max_pages",
            Self::MaxItems => "max_items",
            Self::NoResultsMarker => "no_results_marker",
            Self::Failed => "failed",
        }
    }
}

/// Result of a run. `records` is always populated with whatever was
/// accumulated, even when `failure` is set — persisting partial output on a
/// fatal error is the caller's decision, not the driver's.
pub struct ScrapeOutcome {
    /// Unique records in discovery order (page order, then in-page order).
    pub records: Vec<ListingRecord>,
    /// Pages that rendered at least one listing container.
    pub pages_visited: usize,
    pub stop: StopReason,
    pub failure: Option<ScrapeError>,
}

impl ScrapeOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

enum DriverState {
    Fetching,
    Extracting(Vec<ListingNode>),
    Advancing { new_on_page: usize },
    Done(StopReason),
    Failed(ScrapeError),
}

enum Fetch {
    Listings(Vec<ListingNode>),
    EndOfResults,
    Revisited,
}

/// Drives sequential pagination over one category listing.
pub struct PaginationDriver {
    profile: SiteProfile,
    listing_wait: Duration,
    inter_page_delay: Duration,
}

impl PaginationDriver {
    #[must_use]
    pub fn new(profile: SiteProfile, listing_wait: Duration, inter_page_delay: Duration) -> Self {
        Self {
            profile,
            listing_wait,
            inter_page_delay,
        }
    }

    /// Runs the pagination loop to completion and returns the accumulated
    /// records together with the stop reason.
    pub fn run<S: BrowserSession>(&self, browser: &mut S, mut session: ScrapeSession) -> ScrapeOutcome {
        let mut state = DriverState::Fetching;

        loop {
            state = match state {
                DriverState::Fetching => {
                    if session.page_cap_reached() {
                        DriverState::Done(StopReason::MaxPages)
                    } else if session.item_cap_reached() {
                        DriverState::Done(StopReason::MaxItems)
                    } else {
                        match self.fetch_page(browser, &mut session) {
                            Ok(Fetch::Listings(nodes)) => DriverState::Extracting(nodes),
                            Ok(Fetch::EndOfResults) => DriverState::Done(StopReason::EndOfListings),
                            Ok(Fetch::Revisited) => DriverState::Done(StopReason::RepeatedUrl),
                            Err(error) => DriverState::Failed(error),
                        }
                    }
                }

                DriverState::Extracting(nodes) => {
                    let mut new_on_page = 0usize;
                    let mut capped = false;
                    for node in &nodes {
                        let record = extract_listing(node, &self.profile);
                        if !session.seen_keys.insert(record.dedup_key().to_owned()) {
                            tracing::debug!(name = %record.name, "skipping already-seen listing");
                            continue;
                        }
                        session.records.push(record);
                        new_on_page += 1;
                        if session.item_cap_reached() {
                            capped = true;
                            break;
                        }
                    }
                    if capped {
                        DriverState::Done(StopReason::MaxItems)
                    } else {
                        DriverState::Advancing { new_on_page }
                    }
                }

                DriverState::Advancing { new_on_page } => {
                    if session.page_cap_reached() {
                        DriverState::Done(StopReason::MaxPages)
                    } else if self.no_results_present(browser) {
                        DriverState::Done(StopReason::NoResultsMarker)
                    } else if new_on_page == 0 {
                        DriverState::Done(StopReason::NoNewListings)
                    } else {
                        session.page += 1;
                        if self.inter_page_delay > Duration::ZERO {
                            std::thread::sleep(self.inter_page_delay);
                        }
                        DriverState::Fetching
                    }
                }

                DriverState::Done(stop) => {
                    tracing::info!(
                        records = session.records.len(),
                        pages = session.pages_visited,
                        stop = stop.as_str(),
                        "scrape run finished"
                    );
                    return ScrapeOutcome {
                        records: session.records,
                        pages_visited: session.pages_visited,
                        stop,
                        failure: None,
                    };
                }

                DriverState::Failed(error) => {
                    tracing::error!(
                        records = session.records.len(),
                        pages = session.pages_visited,
                        error = %error,
                        "scrape run aborted — partial results preserved"
                    );
                    return ScrapeOutcome {
                        records: session.records,
                        pages_visited: session.pages_visited,
                        stop: StopReason::Failed,
                        failure: Some(error),
                    };
                }
            };
        }
    }

    /// Loads the current cursor page and snapshots its listing containers.
    fn fetch_page<S: BrowserSession>(
        &self,
        browser: &mut S,
        session: &mut ScrapeSession,
    ) -> Result<Fetch, ScrapeError> {
        let url = page_url(&session.start_url, session.page)?;
        tracing::info!(page = session.page, %url, "fetching listing page");
        browser.load(&url)?;

        // Compare where we actually landed, not what we asked for: a site
        // that runs out of pages often redirects back to an earlier one.
        let landed = canonicalize(&browser.current_url());
        if !session.visited_urls.insert(landed.clone()) {
            tracing::info!(url = %landed, "page resolved to an already-visited URL");
            return Ok(Fetch::Revisited);
        }

        for marker in &self.profile.denied_markers {
            if browser.page_contains(marker)? {
                return Err(ScrapeError::AccessDenied {
                    url: landed,
                    marker: marker.clone(),
                });
            }
        }

        let appeared = browser.wait_for(&self.profile.container, self.listing_wait)?;
        let nodes = if appeared {
            browser.listing_nodes(&self.profile.container)?
        } else {
            Vec::new()
        };

        if nodes.is_empty() {
            if session.pages_visited == 0 {
                return Err(ScrapeError::EmptyFirstPage { url: landed });
            }
            tracing::info!(page = session.page, "no listing containers — end of results");
            return Ok(Fetch::EndOfResults);
        }

        session.pages_visited += 1;
        tracing::info!(page = session.page, listings = nodes.len(), "listing containers found");
        Ok(Fetch::Listings(nodes))
    }

    fn no_results_present<S: BrowserSession>(&self, browser: &mut S) -> bool {
        self.profile
            .no_results_marker
            .as_deref()
            .is_some_and(|marker| browser.page_contains(marker).unwrap_or(false))
    }
}

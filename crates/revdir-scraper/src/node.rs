//! An owned, parsed listing container detached from the live page.
//!
//! The driver snapshots each container's outer HTML out of the browser before
//! extraction runs, so field lookups never touch (or race with) the rendered
//! page and stale-element problems cannot occur. Lookups are best-effort:
//! a selector that matches nothing — or does not even parse — yields `None`.

use scraper::{Html, Selector};

/// One listing container, parsed as a standalone HTML fragment.
pub struct ListingNode {
    fragment: Html,
}

impl ListingNode {
    /// Parses a container's outer HTML into a queryable node.
    ///
    /// HTML parsing is error-recovering; any input produces a node, possibly
    /// one that matches no selectors.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        Self {
            fragment: Html::parse_fragment(html),
        }
    }

    /// Returns the trimmed text content of the first element matching
    /// `selector`, or `None` if nothing matches or the text is empty.
    #[must_use]
    pub fn read_text(&self, selector: &str) -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        let element = self.fragment.select(&selector).next()?;
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Returns the value of `attr` on the first element matching `selector`,
    /// or `None` if nothing matches or the attribute is absent/empty.
    #[must_use]
    pub fn read_attribute(&self, selector: &str, attr: &str) -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        let element = self.fragment.select(&selector).next()?;
        let value = element.value().attr(attr)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_owned())
        }
    }
}

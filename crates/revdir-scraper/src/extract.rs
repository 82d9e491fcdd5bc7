//! Field extraction from a single listing container.
//!
//! Extraction never fails: each field walks its selector-fallback chain
//! independently and settles on "absent" when nothing matches. The only
//! parsing beyond selector lookups is the rating text, which combines the
//! average rating and the parenthesized review count in one visible string.

use std::sync::LazyLock;

use regex::Regex;
use revdir_core::ListingRecord;

use crate::node::ListingNode;
use crate::profile::{SiteProfile, Strategy};

/// Matches `"4.4 (12,540)"` — a rating followed by a review count in
/// parentheses, with optional thousands separators.
static RATING_WITH_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*\((\d[\d,]*)\)").expect("rating pattern is valid")
});

/// Extracts one [`ListingRecord`] from a listing container.
///
/// Every sub-field lookup is independently best-effort; a node matching none
/// of the profile's selectors yields a record with an empty name and all
/// optional fields absent.
#[must_use]
pub fn extract_listing(node: &ListingNode, profile: &SiteProfile) -> ListingRecord {
    let name = first_match(node, &profile.product_name)
        .map(|text| clean_name(&text))
        .unwrap_or_default();

    let (average_rating, review_count) = first_match(node, &profile.rating_text)
        .map_or((None, None), |text| parse_rating_text(&text));

    ListingRecord {
        name,
        profile_url: first_match(node, &profile.profile_url),
        website_url: first_match(node, &profile.website_url),
        average_rating,
        review_count,
    }
}

/// Walks a strategy chain and returns the first non-empty value.
fn first_match(node: &ListingNode, chain: &[Strategy]) -> Option<String> {
    chain.iter().find_map(|strategy| strategy.apply(node))
}

/// Splits visible rating text into `(average_rating, review_count)`.
///
/// - `"4.4 (12,540)"` → `(Some(4.4), Some(12540))`
/// - `"4.4"` (or `"4.4 out of 5"`) → `(Some(4.4), None)` — the first
///   whitespace-separated token must parse as a number
/// - empty or non-numeric text → `(None, None)`
#[must_use]
pub fn parse_rating_text(text: &str) -> (Option<f64>, Option<u64>) {
    if let Some(captures) = RATING_WITH_COUNT.captures(text) {
        let rating = captures[1].parse::<f64>().ok();
        let count = captures[2].replace(',', "").parse::<u64>().ok();
        if rating.is_some() {
            return (rating, count);
        }
    }

    let rating = text
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok());
    (rating, None)
}

/// Some card layouts fold a badge line into the name element
/// (e.g., `"Outbound\nSponsored"`); keep only the first line.
fn clean_name(text: &str) -> String {
    text.lines()
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_rating_text
    // -----------------------------------------------------------------------

    #[test]
    fn rating_with_count_parses_both() {
        assert_eq!(parse_rating_text("4.4 (12,540)"), (Some(4.4), Some(12_540)));
    }

    #[test]
    fn rating_with_count_no_separator() {
        assert_eq!(parse_rating_text("4.8 (321)"), (Some(4.8), Some(321)));
    }

    #[test]
    fn rating_with_count_no_space_before_parens() {
        assert_eq!(parse_rating_text("4.4(12,540)"), (Some(4.4), Some(12_540)));
    }

    #[test]
    fn bare_rating_has_no_count() {
        assert_eq!(parse_rating_text("4.4"), (Some(4.4), None));
    }

    #[test]
    fn integer_rating_is_accepted() {
        assert_eq!(parse_rating_text("5 (3)"), (Some(5.0), Some(3)));
    }

    #[test]
    fn empty_text_parses_to_absent() {
        assert_eq!(parse_rating_text(""), (None, None));
    }

    #[test]
    fn non_matching_text_parses_to_absent() {
        assert_eq!(parse_rating_text("No reviews yet"), (None, None));
    }

    #[test]
    fn embedded_pattern_is_found() {
        assert_eq!(
            parse_rating_text("Rated 4.2 (870) by users"),
            (Some(4.2), Some(870))
        );
    }

    // -----------------------------------------------------------------------
    // extract_listing
    // -----------------------------------------------------------------------

    const G2_CARD: &str = r#"
        <div class="product-card x-software-component-card">
          <a href="https://www.g2.com/products/hubspot/reviews">
            <div itemprop="name">HubSpot</div>
          </a>
          <div class="d-f ai-c fw-w">
            <span class="fw-semibold">4.4</span>
            <span class="pl-4th">(12,540)</span>
          </div>
          <input id="secure_url" type="hidden" value="https://www.hubspot.com">
        </div>"#;

    #[test]
    fn extracts_full_g2_card() {
        let node = ListingNode::from_html(G2_CARD);
        let record = extract_listing(&node, &SiteProfile::g2());
        assert_eq!(record.name, "HubSpot");
        assert_eq!(
            record.profile_url.as_deref(),
            Some("https://www.g2.com/products/hubspot/reviews")
        );
        assert_eq!(record.website_url.as_deref(), Some("https://www.hubspot.com"));
        assert_eq!(record.average_rating, Some(4.4));
        assert_eq!(record.review_count, Some(12_540));
    }

    #[test]
    fn node_matching_nothing_yields_all_absent_never_fails() {
        let node = ListingNode::from_html("<div><p>unrelated markup</p></div>");
        let record = extract_listing(&node, &SiteProfile::g2());
        assert!(record.name.is_empty());
        assert!(record.profile_url.is_none());
        assert!(record.website_url.is_none());
        assert!(record.average_rating.is_none());
        assert!(record.review_count.is_none());
    }

    #[test]
    fn rating_without_count_leaves_count_absent() {
        let html = r#"
            <div>
              <div itemprop="name">Pipedrive</div>
              <span class="fw-semibold">4.3</span>
            </div>"#;
        let node = ListingNode::from_html(html);
        let record = extract_listing(&node, &SiteProfile::g2());
        assert_eq!(record.average_rating, Some(4.3));
        assert!(record.review_count.is_none());
    }

    #[test]
    fn capterra_name_falls_through_chain() {
        let html = r#"
            <div data-testid="product-card-container-42">
              <a data-testid="product-header-link-42">Zoho CRM</a>
              <span class="sb type-40 star-rating-label">4.3 (6,912)</span>
            </div>"#;
        let node = ListingNode::from_html(html);
        let record = extract_listing(&node, &SiteProfile::capterra());
        // Neither h2 variant is present; the generic anchor fallback fires.
        assert_eq!(record.name, "Zoho CRM");
        assert_eq!(record.average_rating, Some(4.3));
        assert_eq!(record.review_count, Some(6_912));
    }

    #[test]
    fn capterra_website_url_is_always_absent() {
        let html = r#"
            <div data-testid="product-card-container-1">
              <h2 data-testid="product-header-profile-link-1">Freshsales</h2>
            </div>"#;
        let node = ListingNode::from_html(html);
        let record = extract_listing(&node, &SiteProfile::capterra());
        assert_eq!(record.name, "Freshsales");
        assert!(record.website_url.is_none());
    }

    #[test]
    fn multi_line_name_keeps_first_line() {
        assert_eq!(clean_name("Outbound\nSponsored listing"), "Outbound");
    }
}

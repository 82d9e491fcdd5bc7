//! Per-site selector profiles.
//!
//! Each extractable field carries an ordered list of lookup strategies; the
//! extractor walks the list and takes the first non-empty value. This keeps
//! the directory-specific selector churn (G2 and Capterra restyle their
//! cards regularly) in data rather than in control flow, and lets a custom
//! site be described in a YAML file without touching code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;
use crate::node::ListingNode;

/// One way to pull a string out of a listing container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Text content of the first element matching `selector`.
    Text { selector: String },
    /// Value of `attr` on the first element matching `selector`.
    Attr { selector: String, attr: String },
}

impl Strategy {
    /// Applies this strategy to `node`, returning a non-empty trimmed value
    /// or `None`.
    #[must_use]
    pub fn apply(&self, node: &ListingNode) -> Option<String> {
        match self {
            Self::Text { selector } => node.read_text(selector),
            Self::Attr { selector, attr } => node.read_attribute(selector, attr),
        }
    }
}

/// Selector profile for one review directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Short identifier used in logs and default file names (e.g., `"g2"`).
    pub name: String,

    /// CSS selector matching one listing container per product card.
    pub container: String,

    /// Fallback chain for the product/company name.
    pub product_name: Vec<Strategy>,

    /// Fallback chain for the directory profile URL.
    #[serde(default)]
    pub profile_url: Vec<Strategy>,

    /// Fallback chain for the combined rating/review-count text
    /// (e.g., `"4.4 (12,540)"`).
    #[serde(default)]
    pub rating_text: Vec<Strategy>,

    /// Fallback chain for the vendor's own website URL.
    #[serde(default)]
    pub website_url: Vec<Strategy>,

    /// Literal page text that means "category has no results".
    #[serde(default)]
    pub no_results_marker: Option<String>,

    /// Literal page texts that mean the site served a block or verification
    /// wall instead of listings. Any match aborts the run.
    #[serde(default)]
    pub denied_markers: Vec<String>,
}

impl SiteProfile {
    /// Built-in profile for G2 category pages.
    #[must_use]
    pub fn g2() -> Self {
        Self {
            name: "g2".to_owned(),
            container: "div.product-card.x-software-component-card".to_owned(),
            product_name: vec![Strategy::Text {
                selector: r#"div[itemprop="name"]"#.to_owned(),
            }],
            profile_url: vec![Strategy::Attr {
                selector: r#"a[href*="/products/"]"#.to_owned(),
                attr: "href".to_owned(),
            }],
            rating_text: vec![
                // Combined rating block renders as "4.4 (12,540)".
                Strategy::Text {
                    selector: "div.d-f.ai-c.fw-w".to_owned(),
                },
                Strategy::Text {
                    selector: "span.fw-semibold".to_owned(),
                },
            ],
            website_url: vec![Strategy::Attr {
                selector: "input#secure_url".to_owned(),
                attr: "value".to_owned(),
            }],
            no_results_marker: None,
            denied_markers: vec![
                "Access Denied".to_owned(),
                "Human Verification".to_owned(),
                "are you a robot".to_owned(),
            ],
        }
    }

    /// Built-in profile for Capterra category pages.
    ///
    /// Capterra cards carry no usable vendor-website field (the site only
    /// exposes it behind a tracked redirect button), so that chain is empty
    /// and the field is always absent.
    #[must_use]
    pub fn capterra() -> Self {
        Self {
            name: "capterra".to_owned(),
            container: r#"div[data-testid^="product-card-container-"]"#.to_owned(),
            product_name: vec![
                Strategy::Text {
                    selector: r#"h2[data-testid^="product-header-upgraded-link-"]"#.to_owned(),
                },
                Strategy::Text {
                    selector: r#"h2[data-testid^="product-header-profile-link-"]"#.to_owned(),
                },
                Strategy::Text {
                    selector: r#"a[data-testid^="product-header-"]"#.to_owned(),
                },
            ],
            profile_url: vec![Strategy::Attr {
                selector: r#"a[data-testid^="product-header-"]"#.to_owned(),
                attr: "href".to_owned(),
            }],
            rating_text: vec![Strategy::Text {
                selector: "span.sb.type-40.star-rating-label".to_owned(),
            }],
            website_url: Vec::new(),
            no_results_marker: None,
            denied_markers: vec![
                "Access to this page has been denied".to_owned(),
                "verify you are human".to_owned(),
            ],
        }
    }

    /// Picks a built-in profile by the start URL's host, or `None` for an
    /// unrecognized site.
    #[must_use]
    pub fn for_url(start_url: &str) -> Option<Self> {
        let host = url::Url::parse(start_url).ok()?.host_str()?.to_lowercase();
        if host == "g2.com" || host.ends_with(".g2.com") {
            Some(Self::g2())
        } else if host == "capterra.com" || host.ends_with(".capterra.com") {
            Some(Self::capterra())
        } else {
            None
        }
    }

    /// Loads a profile from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Profile`] when the file cannot be read or does
    /// not deserialize into a profile.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ScrapeError::Profile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&contents).map_err(|e| ScrapeError::Profile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_url_matches_g2() {
        let profile = SiteProfile::for_url("https://www.g2.com/categories/crm").unwrap();
        assert_eq!(profile.name, "g2");
    }

    #[test]
    fn for_url_matches_capterra() {
        let profile =
            SiteProfile::for_url("https://www.capterra.com/customer-relationship-management-software/")
                .unwrap();
        assert_eq!(profile.name, "capterra");
    }

    #[test]
    fn for_url_rejects_lookalike_host() {
        assert!(SiteProfile::for_url("https://notg2.com/categories/crm").is_none());
    }

    #[test]
    fn for_url_unknown_site_is_none() {
        assert!(SiteProfile::for_url("https://example.com/listings").is_none());
    }

    #[test]
    fn for_url_unparseable_is_none() {
        assert!(SiteProfile::for_url("not a url").is_none());
    }

    #[test]
    fn strategy_yaml_round_trip() {
        let yaml = r"
name: custom
container: div.card
product_name:
  - kind: text
    selector: h3.title
profile_url:
  - kind: attr
    selector: a.profile
    attr: href
denied_markers:
  - Access Denied
";
        let profile: SiteProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.name, "custom");
        assert_eq!(profile.container, "div.card");
        assert!(matches!(
            profile.product_name.as_slice(),
            [Strategy::Text { selector }] if selector == "h3.title"
        ));
        assert!(matches!(
            profile.profile_url.as_slice(),
            [Strategy::Attr { selector, attr }] if selector == "a.profile" && attr == "href"
        ));
        assert!(profile.rating_text.is_empty());
        assert!(profile.no_results_marker.is_none());
        assert_eq!(profile.denied_markers, ["Access Denied"]);
    }

    #[test]
    fn from_yaml_file_missing_file_is_profile_error() {
        let result = SiteProfile::from_yaml_file("/nonexistent/profile.yaml");
        assert!(matches!(result, Err(ScrapeError::Profile { .. })));
    }
}

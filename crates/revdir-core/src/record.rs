//! The scraped listing record shared by the scraper and the CLI.

use serde::{Deserialize, Serialize};

/// One product listing scraped from a review-directory category page.
///
/// Every field except `name` is optional: absence means the field was not
/// found on the page, never that extraction failed. `name` itself may be
/// empty when no selector matched — an empty-name record is still a valid
/// record, it just dedups by its (empty) name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Product or company name as rendered on the listing card.
    pub name: String,

    /// Link to the product's profile page on the directory itself
    /// (e.g., a `/products/...` URL on G2).
    #[serde(default)]
    pub profile_url: Option<String>,

    /// The vendor's own website, when the card exposes it.
    #[serde(default)]
    pub website_url: Option<String>,

    /// Average star rating, conventionally 0.0–5.0.
    #[serde(default)]
    pub average_rating: Option<f64>,

    /// Number of reviews behind the rating.
    #[serde(default)]
    pub review_count: Option<u64>,
}

impl ListingRecord {
    /// Returns a record with the given name and all optional fields absent.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_url: None,
            website_url: None,
            average_rating: None,
            review_count: None,
        }
    }

    /// The identity used for cross-page deduplication: the profile URL when
    /// present and non-empty, otherwise the name.
    ///
    /// Two records with the same non-empty profile URL are the same product
    /// even if the directory renders the name differently between pages.
    #[must_use]
    pub fn dedup_key(&self) -> &str {
        match self.profile_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => &self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_leaves_all_optional_fields_absent() {
        let record = ListingRecord::named("Salesforce");
        assert_eq!(record.name, "Salesforce");
        assert!(record.profile_url.is_none());
        assert!(record.website_url.is_none());
        assert!(record.average_rating.is_none());
        assert!(record.review_count.is_none());
    }

    #[test]
    fn dedup_key_prefers_profile_url() {
        let mut record = ListingRecord::named("HubSpot");
        record.profile_url = Some("https://example.com/products/hubspot".to_owned());
        assert_eq!(record.dedup_key(), "https://example.com/products/hubspot");
    }

    #[test]
    fn dedup_key_falls_back_to_name_when_profile_url_absent() {
        let record = ListingRecord::named("HubSpot");
        assert_eq!(record.dedup_key(), "HubSpot");
    }

    #[test]
    fn dedup_key_falls_back_to_name_when_profile_url_empty() {
        let mut record = ListingRecord::named("HubSpot");
        record.profile_url = Some(String::new());
        assert_eq!(record.dedup_key(), "HubSpot");
    }
}

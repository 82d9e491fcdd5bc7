//! Page-cursor URL construction and the canonical form used by the
//! cycle guard.
//!
//! The driver builds each page's URL explicitly from the start URL and a
//! 1-based page number instead of chasing a "next" link. That keeps the
//! cursor deterministic and lets a run restart from an arbitrary page.
//! Both G2 and Capterra paginate with a `page` query parameter and treat
//! its absence as page 1.

use url::Url;

use crate::error::ScrapeError;

/// Builds the URL for `page` of the listing that starts at `start_url`.
///
/// Any existing `page` parameter on the start URL is replaced. Page 1 carries
/// no `page` parameter at all, matching how the sites canonicalize their
/// first page.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidStartUrl`] when `start_url` does not parse.
pub fn page_url(start_url: &str, page: u32) -> Result<String, ScrapeError> {
    let mut url = Url::parse(start_url).map_err(|e| ScrapeError::InvalidStartUrl {
        url: start_url.to_owned(),
        reason: e.to_string(),
    })?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.set_query(None);
    if !retained.is_empty() || page > 1 {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        if page > 1 {
            pairs.append_pair("page", &page.to_string());
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url.into())
}

/// Reduces a URL to the canonical form compared by the visited-set cycle
/// guard: no fragment, no trailing slash on a non-root path.
///
/// Unparseable input is returned as-is — the guard still works on exact
/// string equality.
#[must_use]
pub fn canonicalize(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_owned();
    };
    parsed.set_fragment(None);

    let path = parsed.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_owned();
        parsed.set_path(&trimmed);
    }
    parsed.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "https://www.g2.com/categories/marketing-automation";

    #[test]
    fn page_one_carries_no_page_param() {
        assert_eq!(page_url(START, 1).unwrap(), START);
    }

    #[test]
    fn later_pages_append_page_param() {
        assert_eq!(
            page_url(START, 3).unwrap(),
            "https://www.g2.com/categories/marketing-automation?page=3"
        );
    }

    #[test]
    fn existing_page_param_is_replaced() {
        let start = "https://www.g2.com/categories/crm?page=7";
        assert_eq!(
            page_url(start, 2).unwrap(),
            "https://www.g2.com/categories/crm?page=2"
        );
        assert_eq!(page_url(start, 1).unwrap(), "https://www.g2.com/categories/crm");
    }

    #[test]
    fn other_query_params_are_preserved() {
        let start = "https://www.g2.com/categories/crm?order=top_rated";
        assert_eq!(
            page_url(start, 2).unwrap(),
            "https://www.g2.com/categories/crm?order=top_rated&page=2"
        );
        assert_eq!(
            page_url(start, 1).unwrap(),
            "https://www.g2.com/categories/crm?order=top_rated"
        );
    }

    #[test]
    fn invalid_start_url_is_rejected() {
        let result = page_url("not a url", 1);
        assert!(matches!(result, Err(ScrapeError::InvalidStartUrl { .. })));
    }

    #[test]
    fn canonicalize_strips_fragment() {
        assert_eq!(
            canonicalize("https://www.capterra.com/crm-software/?page=2#reviews"),
            "https://www.capterra.com/crm-software?page=2"
        );
    }

    #[test]
    fn canonicalize_strips_trailing_slash() {
        assert_eq!(
            canonicalize("https://www.capterra.com/crm-software/"),
            "https://www.capterra.com/crm-software"
        );
    }

    #[test]
    fn canonicalize_keeps_root_path() {
        assert_eq!(canonicalize("https://www.g2.com/"), "https://www.g2.com/");
    }

    #[test]
    fn canonicalize_passes_through_unparseable_input() {
        assert_eq!(canonicalize("not a url"), "not a url");
    }
}

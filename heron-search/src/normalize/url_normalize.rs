//! URL canonicalisation: tracking-parameter removal.
//!
//! Unlike a dedup-only normaliser this keeps the URL usable as a citation:
//! remaining query parameters stay in their original order and the fragment
//! is preserved. Only the deny-listed tracking parameters are dropped.

use url::Url;

/// Tracking query parameters that are stripped during canonicalisation.
pub const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "utm_id",
    "gclid",
    "gbraid",
    "wbraid",
    "dclid",
    "fbclid",
    "msclkid",
    "yclid",
    "mc_cid",
    "mc_eid",
];

/// Canonicalise a URL for citation and deduplication.
///
/// Parses the URL, removes every query parameter whose key (compared
/// case-insensitively) is in [`TRACKING_PARAMS`], and reserialises it with
/// scheme, host, path, the remaining parameters in their original order, and
/// the fragment. An emptied query string is removed entirely.
///
/// If the input cannot be parsed as a URL it is returned unchanged.
///
/// # Examples
///
/// ```
/// use heron_search::normalize::url_normalize::canonicalize_url;
///
/// let url = canonicalize_url("https://example.com/a?b=2&utm_source=x&a=1#top");
/// assert_eq!(url, "https://example.com/a?b=2&a=1#top");
/// ```
pub fn canonicalize_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw.trim()) else {
        return raw.to_string();
    };

    if let Some(query) = parsed.query().map(str::to_owned) {
        let kept: Vec<&str> = query
            .split('&')
            .filter(|pair| !pair.is_empty() && !is_tracking_pair(pair))
            .collect();

        if kept.is_empty() {
            parsed.set_query(None);
        } else {
            parsed.set_query(Some(&kept.join("&")));
        }
    }

    parsed.to_string()
}

/// Returns `true` if a raw `key=value` pair names a tracking parameter.
fn is_tracking_pair(pair: &str) -> bool {
    let key = pair.split_once('=').map_or(pair, |(k, _)| k);
    let key = key.to_ascii_lowercase();
    TRACKING_PARAMS.contains(&key.as_str())
}

//! Shareable address binding for filter selections.
//!
//! Filters are the only navigation state that survives a reload: they map
//! to query parameters on a shareable URL. Drill position is deliberately
//! not persisted. Round-trip contract: `read(write(filters)) == filters`
//! for every representable [`FilterState`].

use url::{form_urlencoded, Url};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::filter::FilterState;

/// Replace the query of `url` with the filter pairs, in key order.
/// An empty filter state removes the query entirely.
pub fn write_filters(url: &mut Url, filters: &FilterState) {
    if filters.is_empty() {
        url.set_query(None);
        return;
    }
    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (key, value) in filters.iter() {
        pairs.append_pair(key, value);
    }
}

/// Read filter pairs back out of a URL's query. Duplicate keys keep the
/// last value (single active value per key).
pub fn read_filters(url: &Url) -> FilterState {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Build a shareable URL from a base address and the active filters.
pub fn share_url(base: &str, filters: &FilterState) -> ApplicationResult<Url> {
    let mut url = Url::parse(base).map_err(|source| ApplicationError::ShareUrl {
        url: base.to_string(),
        source,
    })?;
    write_filters(&mut url, filters);
    Ok(url)
}

/// Parse a shareable address back into filter state.
pub fn parse_share_url(address: &str) -> ApplicationResult<FilterState> {
    let url = Url::parse(address).map_err(|source| ApplicationError::ShareUrl {
        url: address.to_string(),
        source,
    })?;
    Ok(read_filters(&url))
}

/// Serialize filters as a bare query string (no leading `?`), for hosts
/// that manage the address themselves.
pub fn to_query_string(filters: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in filters.iter() {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Parse a bare query string into filter state. Inverse of
/// [`to_query_string`] for every representable state.
pub fn from_query_string(query: &str) -> FilterState {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(pairs: &[(&str, &str)]) -> FilterState {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn given_filters_when_round_tripping_query_string_then_equal() {
        let state = filters(&[("region", "emea"), ("track", "cloud-ops")]);
        assert_eq!(from_query_string(&to_query_string(&state)), state);
    }

    #[test]
    fn given_reserved_characters_when_round_tripping_then_equal() {
        let state = filters(&[("team", "r&d"), ("q", "50% done"), ("path", "a/b=c")]);
        assert_eq!(from_query_string(&to_query_string(&state)), state);
    }

    #[test]
    fn given_empty_filters_when_writing_then_query_removed() {
        let mut url = Url::parse("https://dash.example.com/metrics?stale=1").unwrap();
        write_filters(&mut url, &FilterState::new());
        assert_eq!(url.query(), None);
        assert_eq!(url.as_str(), "https://dash.example.com/metrics");
    }

    #[test]
    fn given_filters_when_writing_then_replaces_existing_query() {
        let mut url = Url::parse("https://dash.example.com/metrics?old=gone").unwrap();
        write_filters(&mut url, &filters(&[("region", "emea")]));
        assert_eq!(url.query(), Some("region=emea"));
    }

    #[test]
    fn given_share_url_when_parsing_then_recovers_filters() {
        let state = filters(&[("level", "advanced"), ("region", "emea")]);
        let url = share_url("https://dash.example.com/metrics", &state).unwrap();
        assert_eq!(parse_share_url(url.as_str()).unwrap(), state);
    }

    #[test]
    fn given_duplicate_keys_in_query_when_reading_then_last_wins() {
        let url = Url::parse("https://x.example/?region=emea&region=apac").unwrap();
        let state = read_filters(&url);
        assert_eq!(state.get("region"), Some("apac"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn given_invalid_base_when_building_share_url_then_errors() {
        let err = share_url("not a url", &FilterState::new()).unwrap_err();
        assert!(matches!(err, ApplicationError::ShareUrl { .. }));
    }

    #[test]
    fn given_serialized_filters_when_inspecting_then_key_order_is_deterministic() {
        let state = filters(&[("b", "2"), ("a", "1"), ("c", "3")]);
        assert_eq!(to_query_string(&state), "a=1&b=2&c=3");
    }
}

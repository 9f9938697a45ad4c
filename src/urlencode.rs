use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Append `params` to `base` as an `application/x-www-form-urlencoded` query.
///
/// Keys are emitted in lexicographic order so the output is stable. If `base`
/// already carries a query string the pairs are joined with `&`.
pub fn urlencode<I, K, V>(base: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let sorted: BTreeMap<String, String> = params
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect();
    if sorted.is_empty() {
        return base.to_string();
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&sorted)
        .finish();
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}{query}")
}

/// Everything outside the RFC 3986 unreserved set is escaped, including `/`,
/// `?`, `#` and `%`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a user-supplied value for use as one path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_query(encoded: &str) -> BTreeMap<String, String> {
        let query = encoded.split_once('?').map(|(_, q)| q).unwrap_or("");
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    #[test]
    fn search_query_recovers_original_mapping() {
        let params = [("q", "foo bar"), ("start", "0"), ("count", "20")];
        let encoded = urlencode("/v2/book/search", params);

        assert!(encoded.starts_with("/v2/book/search?"));
        let expected: BTreeMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(parse_query(&encoded), expected);
    }

    #[test]
    fn keys_are_sorted() {
        let encoded = urlencode("/v2/movie/search", [("tag", "x"), ("count", "1"), ("start", "0")]);
        assert_eq!(encoded, "/v2/movie/search?count=1&start=0&tag=x");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let encoded = urlencode("/v2/user", [("q", "a&b=c/d+e")]);
        assert_eq!(encoded, "/v2/user?q=a%26b%3Dc%2Fd%2Be");
        assert_eq!(parse_query(&encoded)["q"], "a&b=c/d+e");
    }

    #[test]
    fn unicode_values_round_trip() {
        let encoded = urlencode("/v2/book/search", [("q", "三体 刘慈欣")]);
        assert!(encoded.is_ascii());
        assert_eq!(parse_query(&encoded)["q"], "三体 刘慈欣");
    }

    #[test]
    fn empty_params_leave_base_untouched() {
        let encoded = urlencode("/v2/movie/top250", Vec::<(&str, &str)>::new());
        assert_eq!(encoded, "/v2/movie/top250");
    }

    #[test]
    fn existing_query_is_extended() {
        let encoded = urlencode("/v2/book/1/collection?fields=all", [("user_id", "ahbei")]);
        assert_eq!(encoded, "/v2/book/1/collection?fields=all&user_id=ahbei");
    }

    #[test]
    fn encode_segment_escapes_slashes_and_spaces() {
        assert_eq!(encode_segment("ahbei"), "ahbei");
        assert_eq!(encode_segment("978-7-5"), "978-7-5");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_segment("x?y#z%"), "x%3Fy%23z%25");
        assert_eq!(encode_segment("阿北"), "%E9%98%BF%E5%8C%97");
    }
}

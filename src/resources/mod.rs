//! One method per Douban v2 read endpoint, each a thin URL template over
//! [`ResourceClient::get`](crate::ResourceClient::get).

pub mod book;
pub mod movie;
pub mod user;

use crate::urlencode::urlencode;

/// Build a paged search path keyed by either `q` or `tag`.
pub(crate) fn search_path(base: &str, key: &str, value: &str, start: u32, count: u32) -> String {
    let start = start.to_string();
    let count = count.to_string();
    urlencode(
        base,
        [(key, value), ("start", start.as_str()), ("count", count.as_str())],
    )
}

/// Keywords are space separated, which form-encodes to `+`.
pub(crate) fn join_keywords<S: AsRef<str>>(keywords: &[S]) -> String {
    keywords
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

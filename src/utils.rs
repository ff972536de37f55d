use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use uuid::Uuid;

/// Everything except the RFC 3986 unreserved characters is escaped.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a query key or value.
pub(crate) fn url_encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ENCODE_SET).to_string()
}

/// Random alphanumeric string of `size` characters.
pub(crate) fn nonce(size: usize) -> String {
    let mut nonce = String::with_capacity(size);

    while nonce.len() < size {
        nonce.push_str(&Uuid::new_v4().simple().to_string());
    }

    nonce.truncate(size);
    nonce
}

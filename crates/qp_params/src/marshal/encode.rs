use alloc::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes escaped in query values: everything except ASCII alphanumerics
/// and `-`, `.`, `_`, `*`. A space becomes `%20`.
pub const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'*');

/// Percent-encodes the UTF-8 bytes of `text`.
///
/// ```
/// use qp_params::marshal::encode_value;
///
/// assert_eq!(encode_value("red shoes & more"), "red%20shoes%20%26%20more");
/// assert_eq!(encode_value("a-b.c_d*e"), "a-b.c_d*e");
/// assert_eq!(encode_value("café"), "caf%C3%A9");
/// ```
#[inline]
pub fn encode_value(text: &str) -> Cow<'_, str> {
    utf8_percent_encode(text, QUERY_VALUE).into()
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use percent_encoding::percent_decode_str;

    use super::encode_value;

    #[test]
    fn unchanged_text_is_borrowed() {
        assert!(matches!(encode_value("plain_text"), alloc::borrow::Cow::Borrowed(_)));
    }

    #[test]
    fn decoding_recovers_the_original() {
        for text in ["", "a b", "100%", "x=1&y=2", "ключ", "emoji 🦀", "/path?q#frag", "+"] {
            let encoded = encode_value(text);
            assert!(!encoded.contains([' ', '&', '=', '+', '#', '?']));
            let decoded: String = percent_decode_str(&encoded).decode_utf8().unwrap().into_owned();
            assert_eq!(decoded, text);
        }
    }
}

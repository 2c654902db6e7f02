#![deny(missing_docs)]

//! # JSON Pointer Utilities
//!
//! Shared helpers for building and walking `#/a/b/c` style JSON pointers.
//!
//! [RFC 6901](https://tools.ietf.org/html/rfc6901) requires `~` to be encoded
//! as `~0` and `/` as `~1`. Pointers appearing in URI fragments may also be
//! percent-encoded.

use percent_encoding::percent_decode_str;
use serde_json::Value as JsonValue;

/// Encodes a single key so it can be appended to a pointer.
///
/// `%` is percent-encoded so that the result survives fragment decoding.
pub fn escape_pointer_segment(segment: &str) -> String {
    segment
        .replace('%', "%25")
        .replace('~', "~0")
        .replace('/', "~1")
}

/// Decodes a JSON Pointer segment taken from a URI fragment.
///
/// Percent-decoding runs first, then `~1` and `~0` are unescaped.
pub fn decode_pointer_segment(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8_lossy()
        .replace("~1", "/")
        .replace("~0", "~")
}

/// Splits a pointer such as `#/definitions/User` into decoded segments.
///
/// The first segment (the part before the first `/`, usually `#` or empty)
/// is always dropped, so `#` and `""` both yield an empty path.
pub fn split_pointer(pointer: &str) -> Vec<String> {
    let fragment = match pointer.find('#') {
        Some(idx) => &pointer[idx + 1..],
        None => pointer,
    };

    fragment
        .split('/')
        .skip(1)
        .map(decode_pointer_segment)
        .collect()
}

/// Appends an escaped segment to a pointer.
pub fn join_pointer(base: &str, segment: &str) -> String {
    format!("{}/{}", base, escape_pointer_segment(segment))
}

/// Walks a raw JSON document along a pointer.
///
/// Array segments must be valid indices. Returns `None` as soon as a step
/// cannot be taken.
pub fn lookup<'a>(document: &'a JsonValue, pointer: &str) -> Option<&'a JsonValue> {
    split_pointer(pointer)
        .iter()
        .try_fold(document, |node, key| match node {
            JsonValue::Object(map) => map.get(key),
            JsonValue::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_order() {
        assert_eq!(escape_pointer_segment("a/~b"), "a~1~0b");
        assert_eq!(escape_pointer_segment("/pets/{id}"), "~1pets~1{id}");
    }

    #[test]
    fn test_decode_pointer_segment_percent_encoding() {
        let encoded = "User%20Profile~1details";
        let decoded = decode_pointer_segment(encoded);
        assert_eq!(decoded, "User Profile/details");
    }

    #[test]
    fn test_percent_decoding_precedes_tilde_unescaping() {
        assert_eq!(decode_pointer_segment("a%7E1b"), "a/b");
    }

    #[test]
    fn test_literal_percent_keys_round_trip() {
        for key in ["a%20b", "100%", "%7E1", "x/~%25"] {
            let escaped = escape_pointer_segment(key);
            assert_eq!(decode_pointer_segment(&escaped), key);
        }

        let doc = json!({ "definitions": { "a%20b": { "type": "string" } } });
        let pointer = join_pointer(&join_pointer("#", "definitions"), "a%20b");
        assert_eq!(pointer, "#/definitions/a%2520b");
        assert_eq!(lookup(&doc, &pointer), Some(&json!({ "type": "string" })));
    }

    #[test]
    fn test_decode_tilde_sequence() {
        // `~01` must decode to `~1`, not `/`.
        assert_eq!(decode_pointer_segment("~01"), "~1");
    }

    #[test]
    fn test_split_pointer() {
        assert_eq!(split_pointer("#/definitions/User"), vec!["definitions", "User"]);
        assert_eq!(split_pointer("#"), Vec::<String>::new());
        assert_eq!(
            split_pointer("other.json#/paths/~1pets"),
            vec!["paths", "/pets"]
        );
    }

    #[test]
    fn test_lookup_objects_and_arrays() {
        let doc = json!({
            "definitions": { "a/b": { "enum": ["x", "y"] } }
        });
        assert_eq!(
            lookup(&doc, "#/definitions/a~1b/enum/1"),
            Some(&json!("y"))
        );
        assert_eq!(lookup(&doc, "#/definitions/missing"), None);
        assert_eq!(lookup(&doc, "#/definitions/a~1b/enum/9"), None);
    }
}

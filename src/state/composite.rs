//! Composite key encoding
//!
//! A composite key packs a namespace and an ordered list of string
//! segments into a single store key that sorts lexicographically by
//! (namespace, segments) and decodes back losslessly. Keys are framed
//! with NUL bytes, so namespaces and segments must be NUL-free.

use crate::registry::error::{RegistryError, RegistryResult};

/// Leading byte of every composite key. Keeps the composite namespace
/// sorted below all plain state keys, which start with printable text.
const COMPOSITE_PREFIX: u8 = 0x00;

/// Segment terminator inside a composite key.
const SEPARATOR: u8 = 0x00;

/// Exclusive upper bound marker for prefix scans. Never a valid byte in
/// UTF-8 text, so `prefix ++ 0xFF` sorts above every key extending
/// `prefix` with more text.
const SCAN_END: u8 = 0xFF;

fn check_part(kind: &'static str, part: &str) -> RegistryResult<()> {
    if part.contains('\0') {
        return Err(RegistryError::InvalidArgument {
            field: kind,
            value: part.to_string(),
        });
    }
    Ok(())
}

/// Encode a namespace and segment list into one composite key.
///
/// Fails if the namespace is empty or any part contains a NUL byte.
pub fn encode_composite_key(namespace: &str, segments: &[&str]) -> RegistryResult<Vec<u8>> {
    if namespace.is_empty() {
        return Err(RegistryError::InvalidArgument {
            field: "namespace",
            value: String::new(),
        });
    }
    check_part("namespace", namespace)?;

    let mut key = Vec::with_capacity(2 + namespace.len() + segments.len() * 8);
    key.push(COMPOSITE_PREFIX);
    key.extend_from_slice(namespace.as_bytes());
    key.push(SEPARATOR);
    for segment in segments {
        check_part("segment", segment)?;
        key.extend_from_slice(segment.as_bytes());
        key.push(SEPARATOR);
    }
    Ok(key)
}

/// Decode a composite key back into its namespace and segments.
pub fn decode_composite_key(key: &[u8]) -> RegistryResult<(String, Vec<String>)> {
    if key.first() != Some(&COMPOSITE_PREFIX) || key.last() != Some(&SEPARATOR) || key.len() < 3 {
        return Err(RegistryError::MalformedKey);
    }

    let mut parts = Vec::new();
    // Skip the composite prefix; the trailing separator yields one empty
    // split element which is dropped below.
    for raw in key[1..key.len() - 1].split(|b| *b == SEPARATOR) {
        let part = std::str::from_utf8(raw).map_err(|_| RegistryError::MalformedKey)?;
        parts.push(part.to_string());
    }
    if parts.is_empty() {
        return Err(RegistryError::MalformedKey);
    }
    let namespace = parts.remove(0);
    if namespace.is_empty() {
        return Err(RegistryError::MalformedKey);
    }
    Ok((namespace, parts))
}

/// Encode the prefix shared by every composite key in `namespace` whose
/// leading segments equal `leading_segments`. Used to bound index scans.
pub fn partial_composite_prefix(
    namespace: &str,
    leading_segments: &[&str],
) -> RegistryResult<Vec<u8>> {
    encode_composite_key(namespace, leading_segments)
}

/// Half-open `[start, end)` range covering exactly the keys that begin
/// with `prefix`.
pub fn prefix_scan_range(prefix: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let start = prefix.to_vec();
    let mut end = prefix.to_vec();
    end.push(SCAN_END);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let key = encode_composite_key("idx", &["USER_7", "REALESTATE_3"]).unwrap();
        let (ns, segments) = decode_composite_key(&key).unwrap();
        assert_eq!(ns, "idx");
        assert_eq!(segments, vec!["USER_7", "REALESTATE_3"]);
    }

    #[test]
    fn test_empty_segments_round_trip() {
        let key = encode_composite_key("idx", &[]).unwrap();
        let (ns, segments) = decode_composite_key(&key).unwrap();
        assert_eq!(ns, "idx");
        assert!(segments.is_empty());
    }

    #[test]
    fn test_rejects_nul_in_parts() {
        assert!(encode_composite_key("bad\0ns", &[]).is_err());
        assert!(encode_composite_key("idx", &["bad\0segment"]).is_err());
        assert!(encode_composite_key("", &["a"]).is_err());
    }

    #[test]
    fn test_rejects_malformed_keys() {
        assert!(decode_composite_key(b"").is_err());
        assert!(decode_composite_key(b"no-prefix\0").is_err());
        assert!(decode_composite_key(&[0x00, b'a']).is_err());
        assert!(decode_composite_key(&[0x00, 0x00]).is_err());
    }

    #[test]
    fn test_sorts_by_namespace_then_segments() {
        let a = encode_composite_key("idx", &["USER_1"]).unwrap();
        let b = encode_composite_key("idx", &["USER_1", "REALESTATE_0"]).unwrap();
        let c = encode_composite_key("idx", &["USER_2"]).unwrap();
        let d = encode_composite_key("jdx", &["USER_0"]).unwrap();
        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
    }

    #[test]
    fn test_partial_prefix_bounds_full_keys() {
        let partial = partial_composite_prefix("idx", &["USER_1"]).unwrap();
        let (start, end) = prefix_scan_range(&partial);

        let inside = encode_composite_key("idx", &["USER_1", "REALESTATE_9"]).unwrap();
        let outside = encode_composite_key("idx", &["USER_10"]).unwrap();

        assert!(inside >= start && inside < end);
        // "USER_10" is a different first segment, not an extension of "USER_1".
        assert!(!(outside >= start && outside < end));
    }
}

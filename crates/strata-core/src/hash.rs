use xxhash_rust::xxh64::Xxh64;

const BASE62_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encode a u64 value as a base62 string (11 chars, zero-padded).
pub fn base62_encode(mut value: u64) -> String {
    let mut result = Vec::with_capacity(11);
    while value > 0 {
        let idx = (value % 62) as usize;
        result.push(BASE62_CHARS[idx] as char);
        value /= 62;
    }
    while result.len() < 11 {
        result.push('0');
    }
    result.iter().rev().collect()
}

/// Compute a fingerprint over an ordered sequence of parts.
///
/// fingerprint = base62(xxhash64(part_0 + '\0' + part_1 + '\0' + ...))
///
/// The separator keeps `["ab", "c"]` and `["a", "bc"]` apart.
pub fn fingerprint<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Xxh64::new(0);
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(b"\0");
    }
    base62_encode(hasher.digest())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_fingerprint() {
        let h1 = fingerprint(["orders.OrderService", "inventory.Stock"]);
        let h2 = fingerprint(["orders.OrderService", "inventory.Stock"]);
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 11);
    }

    #[test]
    fn test_fingerprint_respects_part_boundaries() {
        assert_ne!(fingerprint(["ab", "c"]), fingerprint(["a", "bc"]));
    }

    #[test]
    fn test_fingerprint_is_order_sensitive() {
        assert_ne!(fingerprint(["a", "b"]), fingerprint(["b", "a"]));
    }

    #[test]
    fn test_base62_encoding() {
        let encoded = base62_encode(0);
        assert_eq!(encoded.len(), 11);
        assert!(encoded.chars().all(|c| c == '0'));

        assert_eq!(base62_encode(61), "0000000000z");
        assert_eq!(base62_encode(62), "00000000010");
    }
}

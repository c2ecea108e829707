use sha2::{Digest, Sha256};

/// Base-62 digits: decimal, then uppercase, then lowercase. Chosen over
/// base-64 to keep codes free of `/`, `+` and `_`.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// How many digest bytes feed the short code. 6 bytes (48 bits) encode to
/// roughly 7 base-62 characters.
const PREFIX_BYTES: usize = 6;

/// Derive a short identifier from a URL.
///
/// The code is a base-62 rendering of the first 48 bits of the URL's
/// SHA-256 digest, so the same URL always yields the same identifier.
/// Truncating the digest makes collisions between different URLs possible
/// at scale; callers that care must check for an existing record before
/// creating one.
pub fn shorten(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());

    let mut value: u64 = 0;
    for byte in &digest[..PREFIX_BYTES] {
        value = (value << 8) | u64::from(*byte);
    }

    encode_base62(value)
}

/// Most-significant digit first, no leading-zero padding. Zero encodes to
/// the empty string.
fn encode_base62(mut value: u64) -> String {
    let mut encoded = String::new();
    while value > 0 {
        let digit = (value % 62) as usize;
        encoded.insert(0, ALPHABET[digit] as char);
        value /= 62;
    }
    encoded
}

/// Check whether a string is an acceptable long-form URL.
///
/// Accepted shape: `http` or `https` scheme, a dot-separated hostname whose
/// last label is alphabetic and at least two characters (a leading `www.`
/// is just an ordinary label), an optional 1-5 digit port, and an optional
/// `/`-rooted tail with no whitespace in it.
pub fn validate_url(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    else {
        return false;
    };

    let host_end = rest.find([':', '/']).unwrap_or(rest.len());
    let (host, tail) = rest.split_at(host_end);
    if !valid_host(host) {
        return false;
    }

    let tail = match tail.strip_prefix(':') {
        Some(after_colon) => {
            let digits = after_colon
                .chars()
                .take_while(char::is_ascii_digit)
                .count();
            if digits == 0 || digits > 5 {
                return false;
            }
            &after_colon[digits..]
        }
        None => tail,
    };

    tail.is_empty() || (tail.starts_with('/') && !tail.contains(char::is_whitespace))
}

/// At least two labels: one or more of `[A-Za-z0-9-]+` followed by an
/// alphabetic top-level label of two or more characters.
fn valid_host(host: &str) -> bool {
    let Some((labels, tld)) = host.rsplit_once('.') else {
        return false;
    };

    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    labels.split('.').all(|label| {
        !label.is_empty()
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_is_deterministic() {
        let url = "https://example.com/some/long/path?q=1";
        assert_eq!(shorten(url), shorten(url));
    }

    #[test]
    fn shorten_output_is_base62() {
        let code = shorten("https://example.com");
        assert!(!code.is_empty());
        // 48 bits never need more than nine base-62 digits.
        assert!(code.len() <= 9);
        assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn shorten_accepts_any_input() {
        // No error path: even the empty string hashes to something.
        let code = shorten("");
        assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn distinct_urls_usually_get_distinct_codes() {
        assert_ne!(shorten("https://a.com"), shorten("https://b.com"));
    }

    #[test]
    fn base62_of_zero_is_empty() {
        assert_eq!(encode_base62(0), "");
    }

    #[test]
    fn base62_digit_order() {
        assert_eq!(encode_base62(9), "9");
        assert_eq!(encode_base62(10), "A");
        assert_eq!(encode_base62(35), "Z");
        assert_eq!(encode_base62(36), "a");
        assert_eq!(encode_base62(61), "z");
        assert_eq!(encode_base62(62), "10");
        assert_eq!(encode_base62(62 * 62), "100");
    }

    #[test]
    fn validate_accepts_plain_https() {
        assert!(validate_url("https://example.com"));
    }

    #[test]
    fn validate_accepts_www_port_path_query() {
        assert!(validate_url("http://www.example.com"));
        assert!(validate_url("https://sub.example.co.uk:8080/path?q=1"));
        assert!(validate_url("https://example.com/"));
        assert!(validate_url("https://example.com/path#frag"));
        assert!(validate_url("https://example.com:1"));
    }

    #[test]
    fn validate_rejects_wrong_scheme() {
        assert!(!validate_url("ftp://example.com"));
        assert!(!validate_url("example.com"));
        assert!(!validate_url("HTTPS://example.com"));
    }

    #[test]
    fn validate_rejects_bad_hosts() {
        assert!(!validate_url("http://ex ample.com"));
        assert!(!validate_url("https://localhost"));
        assert!(!validate_url("https://example.c"));
        assert!(!validate_url("https://example.c0m"));
        assert!(!validate_url("https://.com"));
        assert!(!validate_url("https://example..com"));
        assert!(!validate_url("https://"));
    }

    #[test]
    fn validate_rejects_bad_ports_and_tails() {
        assert!(!validate_url("https://example.com:"));
        assert!(!validate_url("https://example.com:123456"));
        assert!(!validate_url("https://example.com:80x"));
        assert!(!validate_url("https://example.com/pa th"));
        assert!(!validate_url("https://example.com?query"));
    }
}

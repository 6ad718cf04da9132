/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! CloudFront's query-string safe base64 alphabet.

/// Rewrites standard base64 into CloudFront's URL-safe alphabet.
///
/// `+` → `-`, `=` → `_`, `/` → `~`. All other characters pass through. There is
/// no inverse: signing never needs to decode.
pub fn url_safe(standard_base64: &str) -> String {
    standard_base64
        .chars()
        .map(|c| match c {
            '+' => '-',
            '=' => '_',
            '/' => '~',
            other => other,
        })
        .collect()
}

/// Standard base64 of `data`, rewritten with [`url_safe`].
pub fn cloudfront_base64(data: &[u8]) -> String {
    url_safe(&base64_simd::STANDARD.encode_to_string(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_url_safe_substitutions() {
        assert_eq!(url_safe("a+b/c=="), "a-b~c__");
        assert_eq!(url_safe("abcXYZ019"), "abcXYZ019");
        assert_eq!(url_safe(""), "");
    }

    #[test]
    fn test_cloudfront_base64_padding() {
        // 1 byte -> two padding characters, 2 bytes -> one
        assert_eq!(cloudfront_base64(b"a"), "YQ__");
        assert_eq!(cloudfront_base64(b"ab"), "YWI_");
        assert_eq!(cloudfront_base64(b"abc"), "YWJj");
    }

    #[test]
    fn test_cloudfront_base64_high_bytes() {
        // 0xfb 0xff encodes to "+/8=" in the standard alphabet
        assert_eq!(cloudfront_base64(&[0xfb, 0xff]), "-~8_");
    }

    proptest! {
        #[test]
        fn cloudfront_base64_has_no_reserved_characters(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let encoded = cloudfront_base64(&data);
            prop_assert!(!encoded.contains('+'));
            prop_assert!(!encoded.contains('='));
            prop_assert!(!encoded.contains('/'));
            prop_assert_eq!(encoded.len(), data.len().div_ceil(3) * 4);
        }
    }
}

use crate::{
    NUMERIC_WIDTH, TOKEN_WIDTH,
    codec::{AttrCodec, CompositeKey, EncodeError, attribute_segments, composite_prefix},
};
use proptest::prelude::*;

#[test]
fn numeric_encoding_is_zero_left_padded() {
    let encoded = AttrCodec::NUMERIC.encode("42").unwrap();
    assert_eq!(encoded.len(), NUMERIC_WIDTH);
    assert_eq!(encoded, "00000000000000000042");
}

#[test]
fn numeric_encoding_covers_u64_max() {
    let encoded = AttrCodec::NUMERIC.encode(&u64::MAX.to_string()).unwrap();
    assert_eq!(encoded.len(), NUMERIC_WIDTH);
    assert_eq!(encoded, "18446744073709551615");
}

#[test]
fn numeric_encoding_rejects_non_integers() {
    for raw in ["", "abc", "-1", "1.5", "0x10"] {
        let err = AttrCodec::NUMERIC.encode(raw).unwrap_err();
        assert!(matches!(err, EncodeError::NotNumeric { .. }), "{raw}");
    }
}

#[test]
fn token_encoding_is_right_space_padded() {
    let encoded = AttrCodec::TOKEN.encode("app1").unwrap();
    assert_eq!(encoded.len(), TOKEN_WIDTH);
    assert_eq!(&encoded[..4], "app1");
    assert!(encoded[4..].chars().all(|c| c == ' '));
}

#[test]
fn token_encoding_accepts_exact_width() {
    let raw = "x".repeat(TOKEN_WIDTH);
    assert_eq!(AttrCodec::TOKEN.encode(&raw).unwrap(), raw);
}

#[test]
fn token_encoding_rejects_overlong_values_instead_of_truncating() {
    let raw = "x".repeat(TOKEN_WIDTH + 1);
    let err = AttrCodec::TOKEN.encode(&raw).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::TokenTooLong { len, width } if len == TOKEN_WIDTH + 1 && width == TOKEN_WIDTH
    ));
}

#[test]
fn token_encoding_rejects_the_separator_character() {
    // A NUL inside a token would splice extra segments into the composite
    // key and corrupt residual matching.
    for raw in ["\u{0}", "a\u{0}b", "\u{0}abc"] {
        let err = AttrCodec::TOKEN.encode(raw).unwrap_err();
        assert!(matches!(err, EncodeError::TokenHasSeparator), "{raw:?}");
    }
}

#[test]
fn distinct_tokens_never_merge_under_padding() {
    // "ab" would be a prefix of "abc" raw; fixed width keeps them apart.
    let a = AttrCodec::TOKEN.encode("ab").unwrap();
    let b = AttrCodec::TOKEN.encode("abc").unwrap();
    assert_ne!(a, b);
    assert!(!b.starts_with(&a));
}

#[test]
fn wildcard_test_runs_on_raw_input() {
    assert!(AttrCodec::NUMERIC.is_wildcard("0").unwrap());
    assert!(!AttrCodec::NUMERIC.is_wildcard("7").unwrap());
    assert!(AttrCodec::TOKEN.is_wildcard("").unwrap());
    // The padded form of the empty token is all spaces and non-empty; the
    // raw form is what decides.
    assert!(!AttrCodec::TOKEN.is_wildcard(" ").unwrap());
    assert!(AttrCodec::NUMERIC.is_wildcard("x").is_err());
}

#[test]
fn composite_key_splits_back_into_segments() {
    let attrs = vec![
        AttrCodec::TOKEN.encode("app1").unwrap(),
        AttrCodec::TOKEN.encode("orgA").unwrap(),
    ];
    let key = CompositeKey::new("org.app", &attrs);
    let segments = attribute_segments(key.as_str(), "org.app").unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0], attrs[0]);
    assert_eq!(segments[1], attrs[1]);

    assert!(attribute_segments(key.as_str(), "worker.profile").is_none());
}

#[test]
fn composite_prefix_is_string_prefix_of_matching_keys() {
    let app = AttrCodec::TOKEN.encode("app1").unwrap();
    let org = AttrCodec::TOKEN.encode("orgA").unwrap();
    let key = CompositeKey::new("org.app", &[app.clone(), org]);

    let by_app = composite_prefix("org.app", &[app]);
    let by_tag = composite_prefix("org.app", &[]);
    assert!(key.as_str().starts_with(&by_app));
    assert!(key.as_str().starts_with(&by_tag));

    let other = composite_prefix("org.app", &[AttrCodec::TOKEN.encode("app2").unwrap()]);
    assert!(!key.as_str().starts_with(&other));
}

proptest! {
    #[test]
    fn numeric_encoding_preserves_order(a in any::<u64>(), b in any::<u64>()) {
        let ea = AttrCodec::NUMERIC.encode(&a.to_string()).unwrap();
        let eb = AttrCodec::NUMERIC.encode(&b.to_string()).unwrap();
        prop_assert_eq!(ea.cmp(&eb), a.cmp(&b));
    }

    #[test]
    fn token_encoding_is_injective(a in "[a-z0-9]{1,32}", b in "[a-z0-9]{1,32}") {
        let ea = AttrCodec::TOKEN.encode(&a).unwrap();
        let eb = AttrCodec::TOKEN.encode(&b).unwrap();
        prop_assert_eq!(a == b, ea == eb);
    }

    #[test]
    fn composite_segments_round_trip(
        attrs in proptest::collection::vec("[a-z0-9]{1,32}", 1..4)
    ) {
        let encoded: Vec<String> = attrs
            .iter()
            .map(|a| AttrCodec::TOKEN.encode(a).unwrap())
            .collect();
        let key = CompositeKey::new("t.tag", &encoded);
        let segments = attribute_segments(key.as_str(), "t.tag").unwrap();
        prop_assert_eq!(segments, encoded.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

//! Property tests for environment variable name derivation.

use proptest::prelude::*;

use layerconf::to_env_key;

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,7}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: segments are upper-cased and joined with underscores.
    #[test]
    fn property_env_key_joins_upper_segments(
        segments in proptest::collection::vec(segment(), 1..=4),
    ) {
        let key = segments.join(".");
        let expected = segments
            .iter()
            .map(|s| s.to_uppercase())
            .collect::<Vec<_>>()
            .join("_");

        prop_assert_eq!(to_env_key(&key), expected);
    }

    /// PROPERTY: derived names never contain dots or lower-case ASCII.
    #[test]
    fn property_env_key_has_no_dots_or_lowercase(key in "[a-z0-9._]{0,24}") {
        let name = to_env_key(&key);
        prop_assert!(!name.contains('.'));
        prop_assert!(!name.bytes().any(|b| b.is_ascii_lowercase()));
        prop_assert_eq!(name.len(), key.len());
    }

    /// PROPERTY: the key's case never changes the derived name.
    #[test]
    fn property_env_key_ignores_case(key in "[a-zA-Z.]{1,16}") {
        prop_assert_eq!(to_env_key(&key), to_env_key(&key.to_lowercase()));
    }
}

//! Property tests for best-effort coercion.

use std::time::Duration;

use proptest::prelude::*;
use serde_json::json;

use layerconf::{parse_duration, Config};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: typed getters never panic, whatever text a layer holds.
    #[test]
    fn property_getters_never_panic_on_arbitrary_text(text in any::<String>()) {
        let layer = json!({ "k": &text }).to_string();
        let mut config = Config::new("json");
        config.read_config([layer.as_bytes()]).unwrap();

        let _ = config.get_bool("k");
        let _ = config.get_int("k");
        let _ = config.get_u32("k");
        let _ = config.get_f64("k");
        let _ = config.get_time("k");
        let _ = config.get_duration("k");
        let _ = config.get_int_slice("k");
        let _ = config.get_string_slice("k");
        let _ = config.get_string_map("k");
        let _ = config.get_string_map_string_slice("k");
        prop_assert_eq!(config.get_string("k"), text);
    }

    /// PROPERTY: reading arbitrary YAML input never panics.
    #[test]
    fn property_read_config_never_panics(input in any::<String>()) {
        let mut config = Config::new("yaml");
        let _ = config.read_config([input.as_bytes()]);
    }

    /// PROPERTY: duration parsing never panics.
    #[test]
    fn property_parse_duration_never_panics(input in "[0-9.a-zµ+-]{0,16}") {
        let _ = parse_duration(&input);
    }

    /// PROPERTY: whole-unit durations parse exactly.
    #[test]
    fn property_whole_units_parse_exactly(n in 0u64..1_000_000) {
        prop_assert_eq!(parse_duration(&format!("{n}ms")), Some(Duration::from_millis(n)));
        prop_assert_eq!(parse_duration(&format!("{n}s")), Some(Duration::from_secs(n)));
        prop_assert_eq!(parse_duration(&format!("{n}h")), Some(Duration::from_secs(n * 3600)));
    }

    /// PROPERTY: a non-zero stored value always beats the fallback.
    #[test]
    fn property_default_only_replaces_zero(stored in any::<i64>(), fallback in any::<i64>()) {
        let mut config = Config::new("json");
        config.read_config([json!({ "n": stored }).to_string().as_bytes()]).unwrap();

        let expected = if stored == 0 { fallback } else { stored };
        prop_assert_eq!(config.get_i64_default("n", fallback), expected);
    }
}

//! Property tests for layer precedence.

use std::collections::BTreeMap;

use proptest::prelude::*;

use layerconf::Config;

fn layer() -> impl Strategy<Value = BTreeMap<String, i64>> {
    proptest::collection::btree_map("[a-e]{1,2}", any::<i64>(), 0..8)
}

fn read(layers: &[BTreeMap<String, i64>]) -> Config {
    let texts: Vec<String> = layers
        .iter()
        .map(|layer| serde_json::to_string(layer).unwrap())
        .collect();
    let mut config = Config::new("json");
    config
        .read_config(texts.iter().map(|text| text.as_bytes()))
        .unwrap();
    config
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a key resolves to the final layer's value if it has one,
    /// otherwise to the latest default layer that defines it.
    #[test]
    fn property_final_layer_then_latest_default(
        layers in proptest::collection::vec(layer(), 1..=4),
    ) {
        let config = read(&layers);
        let (last, defaults) = layers.split_last().unwrap();

        let keys: Vec<&String> = layers.iter().flat_map(|layer| layer.keys()).collect();
        for key in keys {
            let expected = last
                .get(key)
                .or_else(|| defaults.iter().rev().find_map(|layer| layer.get(key)))
                .copied();
            prop_assert_eq!(expected, Some(config.get_i64(key)));
            prop_assert!(config.is_set(key));
        }
    }

    /// PROPERTY: every leaf reported by all_keys resolves.
    #[test]
    fn property_all_keys_resolve(layers in proptest::collection::vec(layer(), 1..=3)) {
        let config = read(&layers);
        for key in config.all_keys() {
            prop_assert!(config.get(&key).is_some(), "{} does not resolve", key);
        }
    }
}

//! Shared fixtures for layerconf integration tests.
//!
//! The fixture mirrors a typical deployment: a defaults layer shipped with
//! the application, then an environment-specific layer read last.

#![allow(dead_code)]

use layerconf::Config;

/// Defaults layer. `smValue.c` only exists here.
pub const DEFAULTS_YAML: &str = r#"
bValue: true
iValue: 1
i32Value: 2
i64Value: 3
uiValue: 4
ui32Value: 5
ui64Value: 6
f64Value: 7.1
sValue: abcd
smValue:
  c: true
"#;

/// Final layer, authoritative for every key it defines.
pub const VALUES_YAML: &str = r#"
tValue: 2020-09-06T01:51:16.749Z
dValue: 1ms
isValue:
- 1
- 2
ssValue:
- a
- b
smValue:
  a: 1
  b: def
smsValue:
  a: b
  b: c
smssValue:
  a:
  - d
  - e
  - f
envValue:
  uri: __abc__
  timeout: 3s
"#;

pub const UNKNOWN: &str = "unknown";

/// Config built from [`DEFAULTS_YAML`] then [`VALUES_YAML`].
pub fn fixture_config() -> Config {
    let mut config = Config::new("yml");
    config
        .read_config([DEFAULTS_YAML.as_bytes(), VALUES_YAML.as_bytes()])
        .unwrap();
    config
}

pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_layerconf")
}

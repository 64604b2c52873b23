//! Environment variable overlay
//!
//! A key such as `redis.uri` is looked up first as the variable `REDIS_URI`.
//! A set, non-empty variable wins over the stored value; an unparseable one
//! reads as the zero value rather than falling through to the store.
//!
//! Every getter has a `*_with` form that takes the variable lookup as a
//! closure, so callers can substitute their own environment.

use std::time::Duration;

use tracing::trace;

use crate::coerce::{self, or_fallback};
use crate::config::Config;
use crate::duration::parse_duration;

/// Derive the environment variable name for a dot-path key.
///
/// Segments are upper-cased and joined with `_`; `a.b.c` becomes `A_B_C`.
/// Keys differing only in separators (`a_b.c` and `a.b_c`) collide.
pub fn to_env_key(key: &str) -> String {
    key.split('.')
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_value(key: &str, get_env: impl Fn(&str) -> Option<String>) -> Option<String> {
    let name = to_env_key(key);
    let value = get_env(&name).filter(|v| !v.is_empty())?;
    trace!(key, env = %name, "using environment override");
    Some(value)
}

impl Config {
    /// String from `KEY_PATH` if set, else from the store.
    pub fn get_string_from_env(&self, key: &str) -> String {
        self.get_string_from_env_with(key, process_env)
    }

    pub fn get_string_from_env_with(
        &self,
        key: &str,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> String {
        match env_value(key, get_env) {
            Some(value) => value,
            None => self.get_string(key),
        }
    }

    pub fn get_string_from_env_default(&self, key: &str, fallback: String) -> String {
        or_fallback(self.get_string_from_env(key), fallback)
    }

    pub fn get_string_from_env_default_with(
        &self,
        key: &str,
        fallback: String,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> String {
        or_fallback(self.get_string_from_env_with(key, get_env), fallback)
    }

    /// Duration from `KEY_PATH` (e.g. `4s`) if set, else from the store.
    pub fn get_duration_from_env(&self, key: &str) -> Duration {
        self.get_duration_from_env_with(key, process_env)
    }

    pub fn get_duration_from_env_with(
        &self,
        key: &str,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> Duration {
        match env_value(key, get_env) {
            Some(value) => coerce::best_effort(key, parse_duration(&value)),
            None => self.get_duration(key),
        }
    }

    pub fn get_duration_from_env_default(&self, key: &str, fallback: Duration) -> Duration {
        or_fallback(self.get_duration_from_env(key), fallback)
    }

    pub fn get_duration_from_env_default_with(
        &self,
        key: &str,
        fallback: Duration,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> Duration {
        or_fallback(self.get_duration_from_env_with(key, get_env), fallback)
    }

    /// Decimal integer from `KEY_PATH` if set, else from the store.
    pub fn get_int_from_env(&self, key: &str) -> isize {
        self.get_int_from_env_with(key, process_env)
    }

    pub fn get_int_from_env_with(
        &self,
        key: &str,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> isize {
        match env_value(key, get_env) {
            Some(value) => coerce::best_effort(key, value.parse().ok()),
            None => self.get_int(key),
        }
    }

    pub fn get_int_from_env_default(&self, key: &str, fallback: isize) -> isize {
        or_fallback(self.get_int_from_env(key), fallback)
    }

    pub fn get_int_from_env_default_with(
        &self,
        key: &str,
        fallback: isize,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> isize {
        or_fallback(self.get_int_from_env_with(key, get_env), fallback)
    }

    /// Boolean from `KEY_PATH` if set, else from the store.
    ///
    /// The variable is lower-cased first, so `TRUE`, `True` and `true` agree.
    pub fn get_bool_from_env(&self, key: &str) -> bool {
        self.get_bool_from_env_with(key, process_env)
    }

    pub fn get_bool_from_env_with(
        &self,
        key: &str,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> bool {
        match env_value(key, get_env) {
            Some(value) => coerce::best_effort(key, coerce::parse_bool(&value.to_lowercase())),
            None => self.get_bool(key),
        }
    }

    /// Only a `false` result can be replaced by `fallback`.
    pub fn get_bool_from_env_default(&self, key: &str, fallback: bool) -> bool {
        or_fallback(self.get_bool_from_env(key), fallback)
    }

    pub fn get_bool_from_env_default_with(
        &self,
        key: &str,
        fallback: bool,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> bool {
        or_fallback(self.get_bool_from_env_with(key, get_env), fallback)
    }

    /// Comma-separated list from `KEY_PATH` if set, else from the store.
    ///
    /// Items are not trimmed: `a, b` yields `"a"` and `" b"`.
    pub fn get_string_slice_from_env(&self, key: &str) -> Vec<String> {
        self.get_string_slice_from_env_with(key, process_env)
    }

    pub fn get_string_slice_from_env_with(
        &self,
        key: &str,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> Vec<String> {
        match env_value(key, get_env) {
            Some(value) => value.split(',').map(str::to_string).collect(),
            None => self.get_string_slice(key),
        }
    }

    pub fn get_string_slice_from_env_default(&self, key: &str, fallback: Vec<String>) -> Vec<String> {
        or_fallback(self.get_string_slice_from_env(key), fallback)
    }

    pub fn get_string_slice_from_env_default_with(
        &self,
        key: &str,
        fallback: Vec<String>,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> Vec<String> {
        or_fallback(self.get_string_slice_from_env_with(key, get_env), fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config() -> Config {
        let mut config = Config::new("yaml");
        config
            .read_config([
                "envValue:\n  uri: __abc__\n  timeout: 3s\n  workers: 2\n  debug: true\n  hosts: [a, b]\n"
                    .as_bytes(),
            ])
            .unwrap();
        config
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_to_env_key() {
        assert_eq!(to_env_key("a.b.c"), "A_B_C");
        assert_eq!(to_env_key("redis.uri"), "REDIS_URI");
        assert_eq!(to_env_key("envValue.uri"), "ENVVALUE_URI");
        assert_eq!(to_env_key("plain"), "PLAIN");
    }

    #[test]
    fn test_string_env_wins_over_store() {
        let config = config();
        assert_eq!(config.get_string_from_env_with("envValue.uri", env(&[])), "__abc__");
        assert_eq!(
            config.get_string_from_env_with("envValue.uri", env(&[("ENVVALUE_URI", "__d__")])),
            "__d__"
        );
    }

    #[test]
    fn test_empty_env_falls_through() {
        let config = config();
        assert_eq!(
            config.get_string_from_env_with("envValue.uri", env(&[("ENVVALUE_URI", "")])),
            "__abc__"
        );
    }

    #[test]
    fn test_string_default_when_absent_everywhere() {
        let config = config();
        assert_eq!(
            config.get_string_from_env_default_with("envValue", "def".to_string(), env(&[])),
            "def"
        );
    }

    #[test]
    fn test_duration_env() {
        let config = config();
        assert_eq!(
            config.get_duration_from_env_with("envValue.timeout", env(&[])),
            Duration::from_secs(3)
        );
        assert_eq!(
            config.get_duration_from_env_with(
                "envValue.timeout",
                env(&[("ENVVALUE_TIMEOUT", "4s")])
            ),
            Duration::from_secs(4)
        );
        assert_eq!(
            config.get_duration_from_env_default_with(
                "envValue.timeout1",
                Duration::from_secs(5),
                env(&[])
            ),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_bad_env_value_reads_as_zero_not_store() {
        let config = config();
        let bad = env(&[("ENVVALUE_TIMEOUT", "soon"), ("ENVVALUE_WORKERS", "many")]);
        assert_eq!(config.get_duration_from_env_with("envValue.timeout", &bad), Duration::ZERO);
        assert_eq!(config.get_int_from_env_with("envValue.workers", &bad), 0);
        assert_eq!(config.get_int_from_env_default_with("envValue.workers", 8, &bad), 8);
    }

    #[test]
    fn test_int_env() {
        let config = config();
        assert_eq!(config.get_int_from_env_with("envValue.workers", env(&[])), 2);
        assert_eq!(
            config.get_int_from_env_with("envValue.workers", env(&[("ENVVALUE_WORKERS", "-7")])),
            -7
        );
    }

    #[test]
    fn test_bool_env_tokens() {
        let config = config();
        assert!(config.get_bool_from_env_with("envValue.debug", env(&[])));
        assert!(!config.get_bool_from_env_with("envValue.debug", env(&[("ENVVALUE_DEBUG", "0")])));
        assert!(!config.get_bool_from_env_with("envValue.debug", env(&[("ENVVALUE_DEBUG", "FALSE")])));
        assert!(config.get_bool_from_env_with("missing.flag", env(&[("MISSING_FLAG", "TRUE")])));
        assert!(!config.get_bool_from_env_with("missing.flag", env(&[("MISSING_FLAG", "yes")])));
        assert!(config.get_bool_from_env_default_with("missing.flag", true, env(&[])));
    }

    #[test]
    fn test_string_slice_env_splits_on_comma() {
        let config = config();
        assert_eq!(
            config.get_string_slice_from_env_with("envValue.hosts", env(&[])),
            vec!["a", "b"]
        );
        assert_eq!(
            config.get_string_slice_from_env_with(
                "envValue.hosts",
                env(&[("ENVVALUE_HOSTS", "x, y,z")])
            ),
            vec!["x", " y", "z"]
        );
        assert_eq!(
            config.get_string_slice_from_env_default_with(
                "envValue.none",
                vec!["fallback".to_string()],
                env(&[])
            ),
            vec!["fallback"]
        );
    }
}

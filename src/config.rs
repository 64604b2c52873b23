//! Typed configuration accessors
//!
//! [`Config`] owns a [`LayeredStore`] and forwards raw operations to it. Each
//! typed getter returns the zero value when the key is absent or does not
//! coerce; each `*_default` getter swaps in the caller's fallback when the
//! result is zero.
//!
//! ```
//! use layerconf::Config;
//!
//! let mut config = Config::new("yaml");
//! config
//!     .read_config(["port: 80\nname: api\n".as_bytes(), "port: 8080\n".as_bytes()])
//!     .unwrap();
//!
//! assert_eq!(config.get_int("port"), 8080);
//! assert_eq!(config.get_string("name"), "api");
//! assert_eq!(config.get_string_default("missing", "fallback".into()), "fallback");
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::coerce::{self, FromConfigValue, ZeroValue};
use crate::error::{LayerconfError, LayerconfResult};
use crate::parser::{ConfigParser, SerdeParser};
use crate::store::LayeredStore;
use crate::tree::{Map, Value};

/// Layered configuration with typed, zero-defaulting accessors.
#[derive(Debug, Clone)]
pub struct Config {
    store: LayeredStore,
}

impl Config {
    /// Create an empty config for `config_type` using the default parser.
    ///
    /// The format name is not checked here; an unknown format fails on read.
    pub fn new(config_type: impl Into<String>) -> Self {
        Self::with_parser(config_type, SerdeParser)
    }

    pub fn with_parser(config_type: impl Into<String>, parser: impl ConfigParser + 'static) -> Self {
        Self {
            store: LayeredStore::new(config_type, Arc::new(parser)),
        }
    }

    /// An empty config sharing this one's format and parser.
    pub(crate) fn empty_like(&self) -> Self {
        Self {
            store: self.store.empty_like(),
        }
    }

    pub fn config_type(&self) -> &str {
        self.store.config_type()
    }

    /// Read layers in order: all but the last become defaults, the last wins.
    pub fn read_config<I, R>(&mut self, readers: I) -> LayerconfResult<()>
    where
        I: IntoIterator<Item = R>,
        R: std::io::Read,
    {
        self.store.read_config(readers)
    }

    /// Open each path and read them as ordered layers.
    pub fn read_config_files<I, P>(&mut self, paths: I) -> LayerconfResult<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let readers = paths
            .into_iter()
            .map(|path| {
                let path = path.as_ref();
                File::open(path)
                    .map(BufReader::new)
                    .map_err(|source| LayerconfError::Io {
                        path: path.to_path_buf(),
                        source,
                    })
            })
            .collect::<LayerconfResult<Vec<_>>>()?;
        self.store.read_config(readers)
    }

    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) {
        self.store.set_default(key, value.into());
    }

    /// Raw stored value for `key`, if any layer or default defines it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.store.find(key)
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.store.is_set(key)
    }

    pub fn all_keys(&self) -> Vec<String> {
        self.store.all_keys()
    }

    pub fn all_settings(&self) -> Map {
        self.store.all_settings()
    }

    /// Read `key` as `T`, or `T`'s zero value.
    pub fn get_as<T: FromConfigValue + ZeroValue>(&self, key: &str) -> T {
        coerce::coerce(key, self.store.find(key))
    }

    /// Read `key` as `T`, or `fallback` when the result is zero.
    pub fn get_or<T: FromConfigValue + ZeroValue>(&self, key: &str, fallback: T) -> T {
        coerce::or_fallback(self.get_as(key), fallback)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get_as(key)
    }

    pub fn get_bool_default(&self, key: &str, fallback: bool) -> bool {
        self.get_or(key, fallback)
    }

    pub fn get_int(&self, key: &str) -> isize {
        self.get_as(key)
    }

    pub fn get_int_default(&self, key: &str, fallback: isize) -> isize {
        self.get_or(key, fallback)
    }

    pub fn get_i32(&self, key: &str) -> i32 {
        self.get_as(key)
    }

    pub fn get_i32_default(&self, key: &str, fallback: i32) -> i32 {
        self.get_or(key, fallback)
    }

    pub fn get_i64(&self, key: &str) -> i64 {
        self.get_as(key)
    }

    pub fn get_i64_default(&self, key: &str, fallback: i64) -> i64 {
        self.get_or(key, fallback)
    }

    pub fn get_uint(&self, key: &str) -> usize {
        self.get_as(key)
    }

    pub fn get_uint_default(&self, key: &str, fallback: usize) -> usize {
        self.get_or(key, fallback)
    }

    pub fn get_u32(&self, key: &str) -> u32 {
        self.get_as(key)
    }

    pub fn get_u32_default(&self, key: &str, fallback: u32) -> u32 {
        self.get_or(key, fallback)
    }

    pub fn get_u64(&self, key: &str) -> u64 {
        self.get_as(key)
    }

    pub fn get_u64_default(&self, key: &str, fallback: u64) -> u64 {
        self.get_or(key, fallback)
    }

    pub fn get_f64(&self, key: &str) -> f64 {
        self.get_as(key)
    }

    pub fn get_f64_default(&self, key: &str, fallback: f64) -> f64 {
        self.get_or(key, fallback)
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get_as(key)
    }

    pub fn get_string_default(&self, key: &str, fallback: String) -> String {
        self.get_or(key, fallback)
    }

    /// Zero time is 0001-01-01T00:00:00Z.
    pub fn get_time(&self, key: &str) -> DateTime<Utc> {
        self.get_as(key)
    }

    pub fn get_time_default(&self, key: &str, fallback: DateTime<Utc>) -> DateTime<Utc> {
        self.get_or(key, fallback)
    }

    pub fn get_duration(&self, key: &str) -> Duration {
        self.get_as(key)
    }

    pub fn get_duration_default(&self, key: &str, fallback: Duration) -> Duration {
        self.get_or(key, fallback)
    }

    pub fn get_int_slice(&self, key: &str) -> Vec<i64> {
        self.get_as(key)
    }

    pub fn get_int_slice_default(&self, key: &str, fallback: Vec<i64>) -> Vec<i64> {
        self.get_or(key, fallback)
    }

    pub fn get_string_slice(&self, key: &str) -> Vec<String> {
        self.get_as(key)
    }

    pub fn get_string_slice_default(&self, key: &str, fallback: Vec<String>) -> Vec<String> {
        self.get_or(key, fallback)
    }

    pub fn get_string_map(&self, key: &str) -> Map {
        self.get_as(key)
    }

    pub fn get_string_map_default(&self, key: &str, fallback: Map) -> Map {
        self.get_or(key, fallback)
    }

    pub fn get_string_map_string(&self, key: &str) -> HashMap<String, String> {
        self.get_as(key)
    }

    pub fn get_string_map_string_default(
        &self,
        key: &str,
        fallback: HashMap<String, String>,
    ) -> HashMap<String, String> {
        self.get_or(key, fallback)
    }

    pub fn get_string_map_string_slice(&self, key: &str) -> HashMap<String, Vec<String>> {
        self.get_as(key)
    }

    pub fn get_string_map_string_slice_default(
        &self,
        key: &str,
        fallback: HashMap<String, Vec<String>>,
    ) -> HashMap<String, Vec<String>> {
        self.get_or(key, fallback)
    }
}

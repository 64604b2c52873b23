//! Layered store
//!
//! Folds an ordered list of layers into two trees:
//! 1. Defaults: every layer but the last, installed key by key at the top level
//! 2. Config: the last layer, authoritative for every key it defines
//!
//! Lookups consult config first and fall back to defaults.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use tracing::debug;

use crate::error::{LayerconfError, LayerconfResult};
use crate::parser::{ConfigParser, ParseFailure};
use crate::tree::{self, Lookup, Map, Value};

/// Two-tier configuration tree built from ordered layers.
#[derive(Clone)]
pub struct LayeredStore {
    config_type: String,
    parser: Arc<dyn ConfigParser>,
    defaults: Map,
    config: Map,
}

impl LayeredStore {
    pub fn new(config_type: impl Into<String>, parser: Arc<dyn ConfigParser>) -> Self {
        Self {
            config_type: config_type.into(),
            parser,
            defaults: Map::new(),
            config: Map::new(),
        }
    }

    /// A store with the same format and parser and no layers applied.
    pub fn empty_like(&self) -> Self {
        Self::new(self.config_type.clone(), Arc::clone(&self.parser))
    }

    pub fn config_type(&self) -> &str {
        &self.config_type
    }

    /// Apply `readers` in order. Zero readers leave the store untouched.
    ///
    /// Stops at the first layer that fails to parse; earlier default layers
    /// stay applied.
    pub fn read_config<I, R>(&mut self, readers: I) -> LayerconfResult<()>
    where
        I: IntoIterator<Item = R>,
        R: Read,
    {
        let mut readers: Vec<R> = readers.into_iter().collect();
        let Some(last) = readers.pop() else {
            return Ok(());
        };
        let last_index = readers.len();

        for (index, reader) in readers.into_iter().enumerate() {
            let layer = self.parse_layer(index, reader)?;
            debug!(index, keys = layer.len(), "applying default layer");
            for (key, value) in layer {
                self.defaults.insert(key, value);
            }
        }

        let layer = self.parse_layer(last_index, last)?;
        debug!(index = last_index, keys = layer.len(), "applying final layer");
        self.config = layer;
        Ok(())
    }

    fn parse_layer<R: Read>(&self, index: usize, mut reader: R) -> LayerconfResult<Map> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| LayerconfError::Parse {
                index,
                format: self.config_type.clone(),
                message: e.to_string(),
            })?;

        let value = self
            .parser
            .parse(&self.config_type, &text)
            .map_err(|failure| match failure {
                ParseFailure::Unsupported => LayerconfError::UnsupportedFormat {
                    format: self.config_type.clone(),
                },
                ParseFailure::Syntax(message) => LayerconfError::Parse {
                    index,
                    format: self.config_type.clone(),
                    message,
                },
            })?;

        match value {
            Value::Object(map) => Ok(tree::normalize_map(map)),
            Value::Null => Ok(Map::new()),
            _ => Err(LayerconfError::NotAMapping { index }),
        }
    }

    /// Install a default at a dot-path key, below anything a layer sets.
    pub fn set_default(&mut self, key: &str, value: Value) {
        let path = tree::key_path(key);
        tree::insert_path(&mut self.defaults, &path, tree::normalize(value));
    }

    /// Resolve `key` against config, then defaults.
    pub fn find(&self, key: &str) -> Option<&Value> {
        let path = tree::key_path(key);
        match tree::search(&self.config, &path) {
            Lookup::Found(value) => return Some(value),
            Lookup::Shadowed => return None,
            Lookup::Missing => {}
        }
        match tree::search(&self.defaults, &path) {
            Lookup::Found(value) => Some(value),
            Lookup::Shadowed | Lookup::Missing => None,
        }
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// The effective tree: defaults with the final layer merged on top.
    pub fn all_settings(&self) -> Map {
        let mut merged = self.defaults.clone();
        tree::overlay(&mut merged, &self.config);
        merged
    }

    /// Sorted dot paths of every leaf in the effective tree.
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        tree::leaf_keys(&self.all_settings(), "", &mut keys);
        keys.sort();
        keys
    }
}

impl fmt::Debug for LayeredStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredStore")
            .field("config_type", &self.config_type)
            .field("defaults", &self.defaults)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

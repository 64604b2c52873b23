//! layerconf - layered configuration with typed defaults and env overlays
//!
//! Layers are read in order: every layer but the last installs defaults, and
//! the last layer is authoritative for any key it defines. Typed getters
//! return the zero value for absent or mistyped keys, `*_default` getters
//! substitute a fallback for zero results, and `*_from_env` getters consult
//! a derived environment variable (`redis.uri` -> `REDIS_URI`) first.

pub mod coerce;
pub mod config;
pub mod duration;
pub mod env;
pub mod error;
pub mod parser;
pub mod shared;
pub mod store;
pub mod tree;

// Re-exports for convenience
pub use coerce::{FromConfigValue, ZeroValue};
pub use config::Config;
pub use duration::parse_duration;
pub use env::to_env_key;
pub use error::{LayerconfError, LayerconfResult};
pub use parser::{ConfigParser, ParseFailure, SerdeParser};
pub use shared::SharedConfig;
pub use store::LayeredStore;
pub use tree::{Map, Value};

//! Parser port and the default serde-backed implementation
//!
//! The layered store never interprets a format itself. It hands each layer's
//! text to a [`ConfigParser`] together with the format name it was built with.

use thiserror::Error;

use crate::tree::{Map, Value};

/// Why a parser rejected a layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// The parser has no grammar for the requested format
    #[error("unsupported config type")]
    Unsupported,

    /// The text is not valid in the requested format
    #[error("{0}")]
    Syntax(String),
}

/// Parser trait for configuration layers.
///
/// Implementations own the grammar of every format they accept. The format
/// name is passed through exactly as the caller declared it.
pub trait ConfigParser: Send + Sync {
    /// Parse one layer into a tree. An empty document is an empty tree.
    fn parse(&self, format: &str, input: &str) -> Result<Value, ParseFailure>;
}

/// Default parser: YAML via `serde_yaml_ng`, JSON via `serde_json`, TOML via `toml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeParser;

impl SerdeParser {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigParser for SerdeParser {
    fn parse(&self, format: &str, input: &str) -> Result<Value, ParseFailure> {
        let kind = format.to_ascii_lowercase();
        if !matches!(kind.as_str(), "yaml" | "yml" | "json" | "toml") {
            return Err(ParseFailure::Unsupported);
        }
        if input.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        match kind.as_str() {
            "yaml" | "yml" => parse_yaml(input),
            "json" => {
                serde_json::from_str::<Value>(input).map_err(|e| ParseFailure::Syntax(e.to_string()))
            }
            _ => toml::from_str::<toml::Value>(input)
                .map(toml_to_value)
                .map_err(|e| ParseFailure::Syntax(e.to_string())),
        }
    }
}

/// Parse YAML with merge keys (`<<: *anchor`) expanded.
///
/// Non-string mapping keys such as integers are rendered as strings.
fn parse_yaml(input: &str) -> Result<Value, ParseFailure> {
    let mut yaml: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(input).map_err(|e| ParseFailure::Syntax(e.to_string()))?;
    yaml.apply_merge().map_err(|e| ParseFailure::Syntax(e.to_string()))?;
    serde_json::to_value(yaml).map_err(|e| ParseFailure::Syntax(e.to_string()))
}

/// Convert a TOML tree into the shared tree type.
///
/// TOML datetimes become their RFC 3339 text so time accessors can read them.
fn toml_to_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_value(value)))
                .collect(),
        ),
    }
}

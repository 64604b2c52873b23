//! Get command handler

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use layerconf::coerce::or_fallback;
use layerconf::{Config, FromConfigValue, Map, Value, ZeroValue};
use serde::Serialize;

use crate::cli::{GetArgs, ValueKind};

type EnvReader<T> = fn(&Config, &str) -> T;

pub fn cmd_get(config: &Config, args: &GetArgs) -> Result<()> {
    println!("{}", render(resolve_value(config, args)?));
    Ok(())
}

/// Resolve `args.key` as the requested type and convert it to JSON for display.
pub fn resolve_value(config: &Config, args: &GetArgs) -> Result<Value> {
    if args.env && !args.kind.supports_env() {
        bail!(
            "--env is only available for string, duration, int, bool and string-slice (got {:?})",
            args.kind
        );
    }

    let value = match args.kind {
        ValueKind::Bool => to_json(resolve::<bool>(
            config,
            args,
            Some(Config::get_bool_from_env),
        )?)?,
        ValueKind::Int => to_json(resolve::<isize>(
            config,
            args,
            Some(Config::get_int_from_env),
        )?)?,
        ValueKind::I32 => to_json(resolve::<i32>(config, args, None)?)?,
        ValueKind::I64 => to_json(resolve::<i64>(config, args, None)?)?,
        ValueKind::Uint => to_json(resolve::<usize>(config, args, None)?)?,
        ValueKind::U32 => to_json(resolve::<u32>(config, args, None)?)?,
        ValueKind::U64 => to_json(resolve::<u64>(config, args, None)?)?,
        ValueKind::Float => to_json(resolve::<f64>(config, args, None)?)?,
        ValueKind::String => to_json(resolve::<String>(
            config,
            args,
            Some(Config::get_string_from_env),
        )?)?,
        ValueKind::Time => {
            let time = resolve::<DateTime<Utc>>(config, args, None)?;
            Value::String(time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        ValueKind::Duration => {
            let duration = resolve::<Duration>(
                config,
                args,
                Some(Config::get_duration_from_env),
            )?;
            Value::String(format!("{duration:?}"))
        }
        ValueKind::IntSlice => to_json(resolve::<Vec<i64>>(config, args, None)?)?,
        ValueKind::StringSlice => to_json(resolve::<Vec<String>>(
            config,
            args,
            Some(Config::get_string_slice_from_env),
        )?)?,
        ValueKind::StringMap => Value::Object(resolve::<Map>(config, args, None)?),
        ValueKind::StringMapString => {
            to_json(resolve::<HashMap<String, String>>(config, args, None)?)?
        }
        ValueKind::StringMapStringSlice => {
            to_json(resolve::<HashMap<String, Vec<String>>>(config, args, None)?)?
        }
    };
    Ok(value)
}

fn resolve<T>(config: &Config, args: &GetArgs, from_env: Option<EnvReader<T>>) -> Result<T>
where
    T: FromConfigValue + ZeroValue,
{
    let value = match (args.env, from_env) {
        (true, Some(read)) => read(config, &args.key),
        _ => config.get_as(&args.key),
    };
    match &args.default {
        Some(text) => Ok(or_fallback(value, parse_default(text, args.kind)?)),
        None => Ok(value),
    }
}

/// Read `--default` text with the same coercion rules as stored values.
///
/// Slices are comma-separated; mappings are JSON objects.
fn parse_default<T: FromConfigValue>(text: &str, kind: ValueKind) -> Result<T> {
    let raw = if kind.is_slice() {
        Value::Array(
            text.split(',')
                .map(|item| Value::String(item.trim().to_string()))
                .collect(),
        )
    } else if kind.is_map() {
        serde_json::from_str(text)
            .with_context(|| format!("--default for {kind:?} must be a JSON object"))?
    } else {
        Value::String(text.to_string())
    };

    T::from_config_value(&raw).ok_or_else(|| anyhow!("invalid --default '{text}' for {kind:?}"))
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).context("Failed to render value")
}

/// Strings print bare; everything else prints as compact JSON.
fn render(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// layerconf - resolve layered configuration the way an application sees it
#[derive(Parser, Debug)]
#[command(name = "layerconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Format of every layer (yaml, yml, json, toml)
    #[arg(
        short,
        long,
        global = true,
        env = "LAYERCONF_FORMAT",
        default_value = "yaml"
    )]
    pub format: String,

    /// Layer file, repeatable; earlier files are defaults, the last one wins
    #[arg(short = 'c', long = "file", global = true)]
    pub files: Vec<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a single key
    Get(GetArgs),

    /// Print the environment variable name derived from a key
    EnvKey {
        /// Dot-path key, e.g. redis.uri
        key: String,
    },

    /// Print the merged settings as JSON
    Dump,

    /// List every resolved key
    Keys,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GetArgs {
    /// Dot-path key, e.g. redis.uri
    pub key: String,

    /// Type to read the value as
    #[arg(short = 't', long = "type", value_enum, default_value_t = ValueKind::String)]
    pub kind: ValueKind,

    /// Check the derived environment variable before the layers
    #[arg(long)]
    pub env: bool,

    /// Fallback used when the resolved value is zero or empty
    #[arg(short, long)]
    pub default: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    I32,
    I64,
    Uint,
    U32,
    U64,
    Float,
    String,
    Time,
    Duration,
    IntSlice,
    StringSlice,
    StringMap,
    StringMapString,
    StringMapStringSlice,
}

impl ValueKind {
    /// Types the environment overlay can read.
    pub fn supports_env(self) -> bool {
        matches!(
            self,
            Self::String | Self::Duration | Self::Int | Self::Bool | Self::StringSlice
        )
    }

    pub fn is_map(self) -> bool {
        matches!(
            self,
            Self::StringMap | Self::StringMapString | Self::StringMapStringSlice
        )
    }

    pub fn is_slice(self) -> bool {
        matches!(self, Self::IntSlice | Self::StringSlice)
    }
}

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use quarry_telemetry::LogFormat;

/// Quarry extraction service
#[derive(Debug, Parser)]
#[command(name = "quarry", about = "Multi-provider LLM extraction service")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "quarry.toml", env = "QUARRY_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "QUARRY_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive, e.g. `info` or `quarry_llm=debug,info`
    #[arg(long, default_value = "info", env = "QUARRY_LOG")]
    pub log: String,

    /// Log line format
    #[arg(long, value_enum, default_value_t = Format::Text, env = "QUARRY_LOG_FORMAT")]
    pub log_format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for LogFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Json => Self::Json,
        }
    }
}

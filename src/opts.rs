//! CLI options.

use std::num::NonZeroU32;

use clap::{Args, Parser, Subcommand};

use crate::prelude::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None, propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(short, long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate
    #[arg(long, default_value = "0", env = "TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Web(WebOpts),
    Replay(ReplayOpts),
}

/// Runs the web application
#[derive(Args)]
pub struct WebOpts {
    #[command(flatten)]
    pub api: ApiOpts,

    /// Web application bind host
    #[arg(long, default_value = "::")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "8081")]
    pub port: u16,

    /// Number of top players to sample for the card usage analysis
    #[arg(long, default_value = "200")]
    pub top_players: usize,
}

/// Clash Royale API connection options.
#[derive(Args, Clone)]
pub struct ApiOpts {
    /// Clash Royale API key
    #[arg(long = "api-key", env = "CLASH_ROYALE_API_KEY", hide_env_values = true)]
    pub key: String,

    /// Clash Royale API base URL
    #[arg(long = "api-base-url", default_value = "https://api.clashroyale.com/v1")]
    pub base_url: String,

    /// Maximum number of API requests per second
    #[arg(long, default_value = "5")]
    pub rate_limit: NonZeroU32,

    /// API request timeout
    #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
    pub request_timeout: StdDuration,
}

/// Looks up the player's recent battles on a running dashboard and prints the rendered analysis
#[derive(Args)]
pub struct ReplayOpts {
    /// Dashboard base URL
    #[arg(long, default_value = "http://localhost:8081")]
    pub base_url: String,

    /// Player tag, sent as is
    pub player_tag: String,
}

pub fn parse() -> Opts {
    Opts::parse()
}

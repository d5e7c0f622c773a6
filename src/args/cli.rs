use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_NAME_TEMPLATE, DEFAULT_RETRIES};
use super::parsers::{
    parse_author_id, parse_bool_env, parse_delay_arg, parse_duration_arg, parse_status_code,
};
use super::types::{Preset, Protocol};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async load generator for the library service - virtual users hammer AddBook over REST or gRPC with randomized author pools."
)]
pub struct TesterArgs {
    /// Path to a TOML or JSON config file (defaults to tank.toml/tank.json if present)
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Start from a built-in load shape
    #[arg(long, ignore_case = true)]
    pub preset: Option<Preset>,

    /// Transport used to reach the service
    #[arg(long, short = 'p', default_value = "http", ignore_case = true)]
    pub protocol: Protocol,

    /// Target endpoint (REST URL, or host:port / http://host:port for gRPC)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Number of concurrent virtual users
    #[arg(long = "vus", alias = "virtual-users", default_value_t = 1)]
    pub vus: u64,

    /// Run duration (supports ms/s/m/h)
    #[arg(long, short = 't', default_value = "10s", value_parser = parse_duration_arg)]
    pub duration: Duration,

    /// Spread virtual user starts over this window instead of starting them all at once
    #[arg(long = "ramp-up", value_parser = parse_duration_arg)]
    pub ramp_up: Option<Duration>,

    /// Author identifier to sample from (repeatable or comma-separated)
    #[arg(
        long = "author-id",
        short = 'a',
        value_delimiter = ',',
        value_parser = parse_author_id
    )]
    pub author_ids: Vec<String>,

    /// Book name template; {{vu}} and {{iter}} are substituted per iteration
    #[arg(long = "name-template", default_value = DEFAULT_NAME_TEMPLATE)]
    pub name_template: String,

    /// Status codes counted as a passed check (defaults: 200,201 for http, 0 for grpc)
    #[arg(long = "success-status", value_delimiter = ',', value_parser = parse_status_code)]
    pub success_statuses: Vec<u16>,

    /// Pause between iterations of a virtual user (0 disables)
    #[arg(long = "think-time", default_value = "100ms", value_parser = parse_delay_arg)]
    pub think_time: Duration,

    /// Per-request timeout
    #[arg(long = "timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Connection establishment timeout
    #[arg(long = "connect-timeout", default_value = "5s", value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// Extra attempts for a request whose connection fails or times out
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    pub retries: u32,

    /// How long in-flight iterations may run after the stop signal
    #[arg(long = "grace-period", default_value = "2s", value_parser = parse_delay_arg)]
    pub grace_period: Duration,

    /// Seed for author sampling; each virtual user derives its own stream
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the reachability request sent before virtual users start
    #[arg(long = "no-preflight")]
    pub no_preflight: bool,

    /// Write the run summary as JSON to this path
    #[arg(long = "summary-json")]
    pub summary_json: Option<String>,

    /// Exit with an error when any check failed
    #[arg(long = "fail-on-check")]
    pub fail_on_check: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by TANK_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

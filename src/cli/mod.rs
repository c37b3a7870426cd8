//! CLI argument definitions.

use std::ffi::OsStr;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::Overrides;
use crate::events::DateRange;
use crate::router::EventQuery;

/// zkev - fetch access-control events from door controllers.
///
/// Each command runs once per device in `--ip`, in the order given.
/// Robot Mode: Use --robot or --format=json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "zkev", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "ZKEV_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output (also: any non-empty NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (default: <config dir>/zkev/config.toml)
    #[arg(long, global = true, env = "ZKEV_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the pyzkaccess backend executable
    #[arg(long, global = true, env = "ZKEV_BACKEND", value_name = "PATH")]
    pub backend: Option<PathBuf>,

    /// Devices to query at the same time (output order is unchanged)
    #[arg(long, short = 'j', global = true, env = "ZKEV_JOBS")]
    pub jobs: Option<NonZeroUsize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }

    /// `--no-color` or the `NO_COLOR` environment variable.
    pub fn colors_disabled(&self) -> bool {
        self.no_color || no_color_requested(std::env::var_os("NO_COLOR").as_deref())
    }
}

/// `NO_COLOR` convention: any non-empty value disables color, empty is ignored.
pub fn no_color_requested(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch events from one or more devices
    #[command(name = "get_events", visible_alias = "get-events")]
    GetEvents(GetEventsArgs),

    /// Show the resolved configuration
    Config(ConfigArgs),

    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every `get_events` subcommand.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Device IP or comma-separated IPs
    #[arg(long, env = "ZKEV_IP", value_name = "IP[,IP...]")]
    pub ip: Option<String>,

    /// Device communication password
    #[arg(long, env = "ZKEV_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Device model [default: ZK100]
    #[arg(long, env = "ZKEV_MODEL")]
    pub model: Option<String>,
}

#[derive(Parser, Debug)]
pub struct GetEventsArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    #[command(subcommand)]
    pub query: QueryCommand,
}

/// Event queries.
#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommand {
    /// Realtime event stream (poll unread events)
    Unread,

    /// Fetch all stored events
    All,

    /// Fetch last N events (client-side slice)
    Last(LastArgs),

    /// Search events by date range
    Search(SearchArgs),

    /// Events from the last N days (up to and including today)
    Recent(RecentArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct LastArgs {
    /// Number of last events
    #[arg(long, allow_negative_numbers = true)]
    pub count: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Start date YYYY-MM-DD (inclusive)
    #[arg(long)]
    pub from: String,

    /// End date YYYY-MM-DD (inclusive)
    #[arg(long)]
    pub to: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RecentArgs {
    /// Number of days to look back
    #[arg(long, default_value = "5")]
    pub days: u32,
}

impl QueryCommand {
    /// Translate into a router query. `today` anchors relative windows.
    pub fn to_query(&self, today: chrono::NaiveDate) -> EventQuery {
        match self {
            Self::Unread => EventQuery::Unread,
            Self::All => EventQuery::All,
            Self::Last(args) => EventQuery::Last { count: args.count },
            Self::Search(args) => EventQuery::Search(DateRange::new(&args.from, &args.to)),
            Self::Recent(args) => EventQuery::Search(DateRange::last_days(args.days, today)),
        }
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Only print the config file path
    #[arg(long)]
    pub path: bool,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

impl Cli {
    /// Collect global and per-command overrides for config resolution.
    pub fn overrides(&self, device: Option<&DeviceArgs>) -> Overrides {
        Overrides {
            ip: device.and_then(|d| d.ip.clone()),
            password: device.and_then(|d| d.password.clone()),
            model: device.and_then(|d| d.model.clone()),
            backend: self.backend.clone(),
            jobs: self.jobs,
        }
    }
}

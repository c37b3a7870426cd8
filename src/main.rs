//! zkev - fetch access-control events from door controllers.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};
use std::time::Duration;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use zkev::backend::{Invoker, ProcessBackend};
use zkev::cli::{self, Cli, Commands};
use zkev::config;
use zkev::dispatch;
use zkev::error::{Result, ZkError};
use zkev::logging;
use zkev::output::{ConfigInfo, Output, OutputMode, VersionInfo};
use zkev::router;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> bool {
        option_env!("VERGEN_GIT_DIRTY") == Some("true")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.colors_disabled() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    logging::init_logging(cli.use_json(), cli.verbose, cli.quiet);
    let output = OutputMode::from_cli(&cli).into_output();

    // One backend process at a time unless --jobs says otherwise, so a
    // single-threaded runtime is enough.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            output.error(&ZkError::Io(e));
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(&cli, output.as_ref())) {
        output.error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, out: &dyn Output) -> Result<()> {
    match &cli.command {
        None => {
            print_quick_start(cli);
            Ok(())
        }
        Some(Commands::GetEvents(args)) => cmd_get_events(cli, args, out).await,
        Some(Commands::Config(args)) => cmd_config(cli, args, out),
        Some(Commands::Version) => {
            cmd_version(out);
            Ok(())
        }
        Some(Commands::Completions(args)) => {
            cmd_completions(args);
            Ok(())
        }
    }
}

// === Quick Start (Robot Mode Optimized) ===

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    commands: RobotCommands,
    shared_options: &'static str,
    output_modes: OutputModes,
}

#[derive(Serialize)]
struct RobotCommands {
    unread: &'static str,
    all: &'static str,
    last: &'static str,
    search: &'static str,
    recent: &'static str,
}

#[derive(Serialize)]
struct OutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

fn print_quick_start(cli: &Cli) {
    if cli.use_json() {
        let help = RobotQuickStart {
            tool: "zkev",
            version: build_info::VERSION,
            description: "Fetch access-control events from door controllers",
            commands: RobotCommands {
                unread: "zkev get_events --ip <IPS> unread",
                all: "zkev get_events --ip <IPS> all",
                last: "zkev get_events --ip <IPS> last --count <N>",
                search: "zkev get_events --ip <IPS> search --from <YYYY-MM-DD> --to <YYYY-MM-DD>",
                recent: "zkev get_events --ip <IPS> recent --days <N>",
            },
            shared_options: "--ip <IP[,IP...]> --password <PW> --model <MODEL>",
            output_modes: OutputModes {
                human: "--format=text (default)",
                robot: "--robot or --format=json",
                compact: "--format=json-compact",
            },
        };
        match serde_json::to_string_pretty(&help) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("{e}"),
        }
        return;
    }

    println!(
        "{} {} - door controller events\n",
        style("zkev").bold().cyan(),
        build_info::VERSION
    );
    println!("{}", style("QUICK START").bold().underlined());
    println!();
    println!(
        "  {}  Poll new events",
        style("zkev get_events --ip 10.0.0.1 unread").green()
    );
    println!(
        "  {}  Dump all events",
        style("zkev get_events --ip 10.0.0.1,10.0.0.2 all").green()
    );
    println!(
        "  {}  Last 20 transactions",
        style("zkev get_events --ip 10.0.0.1 last --count 20").green()
    );
    println!(
        "  {}  Date range",
        style("zkev get_events --ip 10.0.0.1 search --from 2024-01-01 --to 2024-01-31").green()
    );
    println!();
    println!("Run {} for full help", style("zkev --help").yellow());
}

// === Command Implementations ===

fn spinner(mode: OutputMode, total: usize) -> Option<ProgressBar> {
    let quiet = matches!(mode, OutputMode::Human { quiet: true, .. });
    if mode.is_robot() || quiet || !io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("0/{total} devices"));
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

async fn cmd_get_events(cli: &Cli, args: &cli::GetEventsArgs, out: &dyn Output) -> Result<()> {
    let loaded = config::load_settings(cli.config.as_deref())?;
    let run = config::run_config(&cli.overrides(Some(&args.device)), &loaded.settings)?;
    let query = args.query.to_query(chrono::Local::now().date_naive());

    info!(
        command = query.name(),
        devices = run.devices.len(),
        jobs = run.jobs.get(),
        "Fetching events"
    );

    let invoker = Invoker::new(ProcessBackend::new(&run.backend), run.credentials);
    let total = run.devices.len();
    let progress = spinner(OutputMode::from_cli(cli), total);
    let mut done = 0usize;

    let invoker = &invoker;
    let query = &query;
    let summary = dispatch::for_each_device(
        &run.devices,
        run.jobs,
        move |device| router::query_device(invoker, device, query),
        |report| {
            done += 1;
            match &progress {
                Some(pb) => {
                    pb.suspend(|| out.device_report(report));
                    pb.set_message(format!("{done}/{total} devices"));
                }
                None => out.device_report(report),
            }
        },
    )
    .await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    out.run_summary(&summary);
    Ok(())
}

fn cmd_config(cli: &Cli, args: &cli::ConfigArgs, out: &dyn Output) -> Result<()> {
    if args.path {
        let path = cli.config.clone().or_else(config::default_config_path);
        out.config_path(path.as_deref());
        return Ok(());
    }

    let loaded = config::load_settings(cli.config.as_deref())?;
    let resolved = config::resolve(&cli.overrides(None), &loaded.settings)?;
    let devices = config::resolve_devices(None, &loaded.settings)
        .map(|list| list.iter().map(ToString::to_string).collect())
        .unwrap_or_default();

    out.config_info(&ConfigInfo::new(&loaded, &resolved, devices));
    Ok(())
}

fn cmd_version(out: &dyn Output) {
    out.version_info(&VersionInfo {
        version: build_info::VERSION,
        git_sha: build_info::git_sha(),
        git_dirty: build_info::git_dirty(),
        build_timestamp: build_info::build_timestamp(),
        rustc_version: build_info::rustc_semver(),
        target: build_info::target(),
    });
}

fn cmd_completions(args: &cli::CompletionsArgs) {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "zkev", &mut io::stdout());
}

//! murmur TUI entry point.

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use murmur_core::{UserId, lifecycle::Credentials, summary::SummaryConfig};
use murmur_tui::{Runtime, TerminalDriver, fixture};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// murmur terminal chat client
#[derive(Parser, Debug)]
#[command(name = "murmur-tui")]
#[command(about = "Terminal chat client with collapsible membership summaries")]
#[command(version)]
struct Args {
    /// JSON timeline fixture to replay (built-in demo if omitted)
    #[arg(short, long)]
    timeline: Option<PathBuf>,

    /// Maximum names listed in a summary before "and N others"
    #[arg(long, default_value_t = 3)]
    summary_length: usize,

    /// Maximum avatars shown in a summary header
    #[arg(long, default_value_t = 5)]
    avatars_max_length: usize,

    /// Minimum run length that gets summarised
    #[arg(long, default_value_t = 3)]
    threshold: usize,

    /// User to log in as
    #[arg(short, long, default_value = "@me:murmur.local")]
    user: String,

    /// Homeserver base URL
    #[arg(long, default_value = "https://murmur.local")]
    homeserver: String,

    /// Identity server base URL
    #[arg(long, default_value = "https://identity.murmur.local")]
    identity_server: String,

    /// Log in as a guest
    #[arg(long)]
    guest: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        let writer = Mutex::new(File::create(path)?);

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .with(filter)
            .init();
    }

    let config = SummaryConfig {
        summary_length: args.summary_length,
        avatars_max_length: args.avatars_max_length,
        threshold: args.threshold,
    };
    config.validate()?;

    let incoming = match &args.timeline {
        Some(path) => fixture::load(path)?,
        None => fixture::demo_timeline(),
    };

    let credentials = Credentials {
        homeserver_url: args.homeserver.clone(),
        identity_server_url: args.identity_server,
        user_id: UserId::new(args.user),
        access_token: String::new(),
        guest: args.guest,
    };

    tracing::info!(?config, "starting murmur-tui");

    let driver = TerminalDriver::new(&args.homeserver, incoming)?;
    Runtime::new(driver, config).run(Some(credentials)).await?;
    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use redacted_api::auth::Session;
use redacted_api::{RedactedClient, TorrentRef};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(
    name = "red-origin",
    version,
    about = "Fetch RED torrent metadata as a plain-text origin report"
)]
struct Cli {
    /// Session cookie (overrides the saved session)
    #[arg(long, global = true, env = "RED_SESSION_COOKIE", hide_env_values = true)]
    cookie: Option<String>,
    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save the `session` cookie
    Login {
        /// Cookie value, with or without the `session=` prefix
        #[arg(value_name = "COOKIE", required_unless_present = "check")]
        value: Option<String>,
        /// Check that the saved session can log in
        #[arg(long)]
        check: bool,
    },
    /// Clear saved session
    Logout,
    /// Print the origin report of a torrent
    Origin {
        /// Torrent id, info hash, or permalink
        torrent: String,
        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Login { value, check } => cmd_login(value, check, cli.cookie),
        Command::Logout => cmd_logout(),
        Command::Origin { torrent, output } => cmd_origin(&torrent, output, cli.cookie),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Cookie from `--cookie`/`RED_SESSION_COOKIE`, else the saved session.
fn resolve_cookie(flag: Option<String>) -> Result<String> {
    if let Some(cookie) = flag {
        return Ok(cookie);
    }
    let session = Session::load().context("failed to read saved session")?;
    match session.cookie() {
        Some(cookie) => Ok(cookie.to_owned()),
        None => bail!("not logged in; run `red-origin login <COOKIE>` or pass --cookie"),
    }
}

// ── login / logout ──

fn cmd_login(value: Option<String>, check: bool, flag: Option<String>) -> Result<()> {
    if check {
        let cookie = resolve_cookie(flag)?;
        match RedactedClient::new(&cookie) {
            Ok(_) => println!("Session is valid."),
            Err(e) => println!("Session exists but login failed: {e}"),
        }
        return Ok(());
    }

    let cookie = value.context("cookie value required")?;
    Session::from_cookie(&cookie).save()?;
    println!("Session saved.");
    Ok(())
}

fn cmd_logout() -> Result<()> {
    Session::clear()?;
    println!("Session cleared.");
    Ok(())
}

// ── origin ──

fn cmd_origin(torrent: &str, output: Option<PathBuf>, flag: Option<String>) -> Result<()> {
    let torrent: TorrentRef = torrent.parse()?;
    let client = RedactedClient::new(&resolve_cookie(flag)?)?;
    debug!(?torrent, "looking up torrent");
    let report = client.origin(&torrent)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &report)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{report}"),
    }
    Ok(())
}

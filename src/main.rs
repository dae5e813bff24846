use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lognav::render::{render_location, render_outcome, render_table, render_timeline};
use lognav::{feeds, Config, EntryRef, FilterSpec, Session};

#[derive(Parser)]
#[command(name = "lognav", about = "lognav — filter and navigate JSON log files")]
struct Cli {
    /// Log files to load. Reads stdin when none are given.
    files: Vec<PathBuf>,

    /// Extra config file layered over ~/.config/lognav/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep only entries matching this pattern (`a*b|c`).
    #[arg(short, long, default_value = "")]
    include: String,

    /// Drop entries matching this pattern. Wins over --include.
    #[arg(short = 'x', long, default_value = "")]
    exclude: String,

    /// Report where `<file>:<line>` appears in the filtered views.
    #[arg(long, value_name = "FILE:LINE")]
    locate: Vec<EntryRef>,

    /// Print the per-file sampled timeline summary instead of the table.
    #[arg(long)]
    timeline: bool,

    /// Print at most this many table rows.
    #[arg(long)]
    limit: Option<usize>,

    /// Write debug logs to /tmp/lognav-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/lognav-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("lognav debug log started — tail -f /tmp/lognav-debug.log");
    }

    let config = Config::load(cli.config.as_deref()).context("loading config")?;
    let mut session = Session::new(&config)?;

    let batch = if cli.files.is_empty() {
        vec![feeds::read_stdin().await?]
    } else {
        feeds::read_files(&cli.files).await?
    };

    let outcome = session.add(batch).await;
    render_outcome(&outcome, &mut std::io::stderr().lock())?;

    session.set_filter(FilterSpec::new(cli.include, cli.exclude));

    let mut out = std::io::stdout().lock();
    if cli.timeline {
        render_timeline(&session, &mut out)?;
    } else if cli.locate.is_empty() {
        render_table(&session, cli.limit, &mut out)?;
    }
    for entry in &cli.locate {
        render_location(entry, session.locate_ref(entry), &mut out)?;
    }
    out.flush()?;
    Ok(())
}

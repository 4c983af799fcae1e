//! Element highlighter validation tool
//!
//! Runs the readiness gate and overlay renderer against a TOML page fixture
//! instead of a browser, then prints the overlays that would be painted.
//!
//! ```text
//! highlighter-validate --fixture page.toml --mode "semantics grid" --snapshot out.png
//! ```

mod fixture;
mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use highlighter_core::config::{load_config, load_toml};
use highlighter_core::{
    Document, OverlayEntry, OverlayRenderer, ReadinessGate, RenderReport, Settled, TokioClock, select_mode,
};
use highlighter_types::{HighlighterConfig, ModeSet};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::fixture::PageFixture;

#[derive(Parser)]
#[command(version, about = "Render element highlight overlays for a page fixture")]
struct Args {
    /// Page fixture (TOML)
    #[arg(short, long)]
    fixture: PathBuf,

    /// Highlighter config (TOML); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mode string overriding the page marker, e.g. "semantics grid"
    #[arg(short, long)]
    mode: Option<String>,

    /// Print the render report as JSON
    #[arg(long)]
    json: bool,

    /// Write a PNG of the overlays
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Readiness timeout override in milliseconds (0 disables it)
    #[arg(long)]
    timeout_ms: Option<u32>,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If HIGHLIGHTER_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("HIGHLIGHTER_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    // Fallback to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), String> {
    let mut config: HighlighterConfig = match &args.config {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => HighlighterConfig::default(),
    };
    if let Some(timeout_ms) = args.timeout_ms {
        config.readiness.timeout_ms = timeout_ms;
    }

    let fixture: PageFixture = load_toml(&args.fixture).map_err(|e| e.to_string())?;
    let gate = ReadinessGate::new(config.readiness);
    let page = fixture.build(&gate);
    if !page.stalled.is_empty() {
        info!(stalled = page.stalled.len(), "Fixture has resources that never load");
    }

    for signal in page.signals {
        tokio::spawn(async move {
            let clock = TokioClock;
            tokio::time::sleep(signal.delay).await;
            signal.token.settle_after_frame(&clock).await;
        });
    }

    let mut document = page.document;
    let report = gate
        .wait(&TokioClock, |settled| {
            if settled == Settled::TimedOut {
                warn!("Rendering before every resource has loaded");
            }
            let modes = match &args.mode {
                Some(mode) => ModeSet::parse(mode),
                None => select_mode(&document, &config),
            };
            OverlayRenderer::new(&config)?.run(&mut document, modes)
        })
        .await
        .map_err(|e| e.to_string())?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    if let Some(path) = &args.snapshot {
        snapshot::save(&report, &document.metrics(), config.outline_width_px, path)?;
        info!(path = %path.display(), "Wrote snapshot");
    }

    Ok(())
}

fn format_entry(entry: &OverlayEntry) -> String {
    let rect = entry.rect;
    format!(
        "{:<9} {:<28} {} inset={} {},{} {}x{}",
        entry.mode.name(),
        entry.label,
        entry.color,
        entry.inset,
        rect.left,
        rect.top,
        rect.width,
        rect.height
    )
}

fn print_report(report: &RenderReport) {
    for entry in &report.entries {
        println!("{}", format_entry(entry));
    }
    println!(
        "{} overlays, {} ignored",
        report.entries.len(),
        report.ignored
    );
}

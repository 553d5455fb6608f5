use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result};
use area_core::{ApplyOutcome, AreaDirectory};
use clap::Parser;
use shared::protocol::{decode_event, decode_snapshot, TownSnapshot};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod watch;

use config::{load_settings, LoadedSettings};
use watch::watch_area;

/// Replays town-service events against local area controllers and logs each notification.
#[derive(Parser, Debug)]
struct Args {
    /// JSON town snapshot with the initial players and interactables.
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// File with one JSON town event per line; stdin when omitted.
    #[arg(long)]
    events: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `area_core=debug`; `RUST_LOG` takes precedence.
    #[arg(long)]
    log_filter: Option<String>,
    /// Skip printing the final interactable models.
    #[arg(long)]
    no_final_state: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let LoadedSettings {
        mut settings,
        warnings,
    } = load_settings();
    if let Some(path) = args.snapshot {
        settings.snapshot_path = Some(path);
    }
    if let Some(path) = args.events {
        settings.events_path = Some(path);
    }
    if let Some(filter) = args.log_filter {
        settings.log_filter = filter;
    }
    if args.no_final_state {
        settings.print_final_state = false;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    for warning in &warnings {
        warn!("{warning}");
    }
    debug!(?settings, "settings loaded");

    let snapshot = match &settings.snapshot_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read snapshot '{}'", path.display()))?;
            decode_snapshot(&raw)
                .with_context(|| format!("invalid snapshot '{}'", path.display()))?
        }
        None => TownSnapshot::default(),
    };
    let mut directory = AreaDirectory::from_snapshot(snapshot)?;
    for area in directory.areas() {
        watch_area(area);
    }

    let reader: Box<dyn BufRead> = match &settings.events_path {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("failed to open events '{}'", path.display())
        })?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut applied = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read event line {line_no}"))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event =
            decode_event(line).with_context(|| format!("invalid event on line {line_no}"))?;
        let outcome = directory
            .apply(event)
            .with_context(|| format!("failed to apply event on line {line_no}"))?;
        if let ApplyOutcome::Created(id) = &outcome {
            if let Some(area) = directory.area(id) {
                watch_area(area);
            }
        }
        debug!(line = line_no, ?outcome, "event applied");
        applied += 1;
    }
    info!(
        events = applied,
        active_conversations = directory.active_conversation_areas().len(),
        "replay finished"
    );

    if settings.print_final_state {
        println!("{}", serde_json::to_string_pretty(&directory.interactables())?);
    }

    Ok(())
}

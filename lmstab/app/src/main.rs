use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use common::{StabilizationConfig, StabilizerKind};
use lmstab::replay::replay;
use lmstab::trace::Trace;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Adaptive,
    DistanceGated,
}

impl From<KindArg> for StabilizerKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Adaptive => StabilizerKind::AdaptiveCutoff,
            KindArg::DistanceGated => StabilizerKind::DistanceGated,
        }
    }
}

/// Replays a recorded landmark trace through a stabilizer.
#[derive(Debug, Parser)]
#[command(name = "lmstab", version)]
struct Args {
    /// Recorded trace (JSON).
    #[arg(long)]
    trace: PathBuf,
    /// Stabilizer config (JSON). Created with defaults if missing.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where to write the stabilized trace; stdout if absent.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Overrides the strategy selected in the config.
    #[arg(long, value_enum)]
    kind: Option<KindArg>,
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => StabilizationConfig::load_or_create(path)?,
        None => StabilizationConfig::default(),
    };
    if let Some(kind) = args.kind {
        config.kind = kind.into();
    }
    config.validate()?;
    debug!("Loaded Config: {:?}", config);

    let trace = Trace::load(&args.trace)?;
    info!("Loaded {} frames from {:?}", trace.frames.len(), args.trace);

    let report = replay(&trace, &config)?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create output {:?}", path))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, &report).context("Failed to write report")?;
    writeln!(writer)?;
    writer.flush()?;

    if let Some(path) = &args.output {
        info!("Wrote stabilized trace to {:?}", path);
    }
    Ok(())
}

use anyhow::{Context, Result};
use biot_client::{Simulation, TargetPath};
use biot_shared::{FlockSettings, Position, Variant};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    Follower,
    Dasher,
    Orbiter,
    Solar,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Follower => Variant::Follower,
            VariantArg::Dasher => Variant::Dasher,
            VariantArg::Orbiter => Variant::Orbiter,
            VariantArg::Solar => Variant::Solar,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PathArg {
    Fixed,
    Circle,
    Figure8,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless biot flock driver", long_about = None)]
struct Args {
    /// JSON settings file; missing fields fall back to defaults
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Number of agents (overrides the settings file)
    #[arg(short, long)]
    agents: Option<usize>,

    /// Agent variant (overrides the settings file)
    #[arg(short = 'v', long, value_enum)]
    variant: Option<VariantArg>,

    /// Ticks per second (overrides the settings file)
    #[arg(long)]
    tps: Option<u32>,

    /// Field size as WIDTHxHEIGHT (overrides the settings file)
    #[arg(long, value_parser = parse_field)]
    field: Option<(f64, f64)>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks; 0 runs until interrupted
    #[arg(short, long, default_value_t = 0)]
    ticks: u64,

    /// Synthetic pointer path
    #[arg(short, long, value_enum, default_value_t = PathArg::Circle)]
    path: PathArg,

    /// Pointer position for the fixed path, as X,Y
    #[arg(long, value_parser = parse_point, default_value = "400,300")]
    target: Position,

    /// Only log the summary, do not print frames
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn parse_point(raw: &str) -> Result<Position, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", raw))?;
    let x = x.trim().parse().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y = y.trim().parse().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok(Position::new(x, y))
}

fn parse_field(raw: &str) -> Result<(f64, f64), String> {
    let (w, h) = raw
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT but got '{}'", raw))?;
    let w = w.trim().parse().map_err(|e| format!("bad width '{}': {}", w, e))?;
    let h = h.trim().parse().map_err(|e| format!("bad height '{}': {}", h, e))?;
    Ok((w, h))
}

fn load_settings(args: &Args) -> Result<FlockSettings> {
    let mut settings = match &args.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            FlockSettings::from_json(&json).context("Failed to parse settings")?
        }
        None => FlockSettings::default(),
    };

    if let Some(agents) = args.agents {
        settings.agents = agents;
    }
    if let Some(variant) = args.variant {
        settings.variant = variant.into();
    }
    if let Some((width, height)) = args.field {
        settings.width = width;
        settings.height = height;
    }
    if let Some(tps) = args.tps {
        settings.tps = tps;
    }

    Ok(settings)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Biot client starting...");

    let settings = load_settings(&args)?;
    let path = match args.path {
        PathArg::Fixed => TargetPath::Fixed(args.target),
        PathArg::Circle => TargetPath::Circle,
        PathArg::Figure8 => TargetPath::Figure8,
    };

    let mut simulation =
        Simulation::new(&settings, path, args.seed).context("Failed to initialize simulation")?;

    let ticks = (args.ticks > 0).then_some(args.ticks);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let summary = simulation
        .run(settings.tps, ticks, &mut out, !args.quiet)
        .await
        .context("Simulation error")?;

    log::info!(
        "Finished after {} ticks: {} agents, centroid {:?}, mean speed {:?}, {} turning",
        summary.ticks,
        summary.agent_count,
        summary.centroid,
        summary.mean_speed,
        summary.turning
    );

    Ok(())
}

//! Headless driver for the biot flock.
//!
//! Stands in for the overlay window: it paces ticks at a fixed rate, feeds
//! the flock a synthetic pointer position and writes every tick as a JSON
//! line for whatever draws it.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use biot_core::{Agent, FlockStd, RandSource, Vector2D};
use biot_shared::{AgentFrame, FlockSettings, FrameUpdate, Position, RunSummary};
use rand::rngs::StdRng;

/// Where the synthetic pointer goes over time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetPath {
    /// Pointer parked at one spot
    Fixed(Position),
    /// Circle around the middle of the field
    Circle,
    /// Lissajous figure eight around the middle of the field
    Figure8,
}

impl TargetPath {
    /// Pointer position at `tick` within a `width` x `height` field
    pub fn at(&self, tick: u64, width: f64, height: f64) -> Vector2D {
        let centre = Vector2D::new(width / 2.0, height / 2.0);
        let radius = width.min(height) / 3.0;
        let t = tick as f64 * 0.01;
        match self {
            TargetPath::Fixed(position) => (*position).into(),
            TargetPath::Circle => centre + Vector2D::new(t.cos(), t.sin()) * radius,
            TargetPath::Figure8 => centre + Vector2D::new(t.sin(), (2.0 * t).sin() / 2.0) * radius,
        }
    }
}

/// One flock plus everything needed to drive it
pub struct Simulation {
    flock: FlockStd,
    rng: RandSource<StdRng>,
    path: TargetPath,
    tick: u64,
}

impl Simulation {
    pub fn new(settings: &FlockSettings, path: TargetPath, seed: Option<u64>) -> Result<Self> {
        settings.validate().context("Invalid flock settings")?;

        let mut rng = match seed {
            Some(seed) => RandSource::seeded(seed),
            None => RandSource::from_entropy(),
        };
        let config = settings.config();

        let flock = match settings.variant.agent_kind() {
            Some(kind) => FlockStd::new(settings.width, settings.height, settings.agents, kind, config, &mut rng),
            None => FlockStd::solar_system(settings.width, settings.height, config, &mut rng),
        };

        log::info!(
            "Created {} {:?} agents in a {}x{} field",
            flock.len(),
            settings.variant,
            settings.width,
            settings.height
        );

        Ok(Self {
            flock,
            rng,
            path,
            tick: 0,
        })
    }

    pub fn flock(&self) -> &FlockStd {
        &self.flock
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Advances the flock once and returns what should be drawn.
    pub fn step(&mut self) -> Result<FrameUpdate> {
        let target = self.path.at(self.tick, self.flock.width, self.flock.height);
        self.flock
            .tick(target, &mut self.rng)
            .with_context(|| format!("Flock failed on tick {}", self.tick))?;
        self.tick += 1;

        Ok(FrameUpdate {
            tick: self.tick,
            target: target.into(),
            agents: self
                .flock
                .frames()
                .map(|(position, heading)| AgentFrame::new(position, heading))
                .collect(),
        })
    }

    pub fn summary(&self) -> RunSummary {
        let followers: Vec<_> = self.flock.agents.iter().filter_map(Agent::as_follower).collect();
        let mean_speed = if followers.is_empty() {
            None
        } else {
            Some(followers.iter().map(|f| f.speed()).sum::<f64>() / followers.len() as f64)
        };

        RunSummary {
            ticks: self.tick,
            agent_count: self.flock.len(),
            centroid: self.flock.centroid().map(Position::from),
            mean_speed,
            turning: followers.iter().filter(|f| f.state().is_turning()).count(),
        }
    }

    /// Ticks at `tps` until `ticks` have run (forever when `None`), writing each frame to `out`.
    pub async fn run<W: Write>(&mut self, tps: u32, ticks: Option<u64>, out: &mut W, emit: bool) -> Result<RunSummary> {
        let period = Duration::from_secs_f64(1.0 / f64::from(tps.max(1)));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        log::info!("Starting tick loop at {} ticks per second...", tps);

        while ticks.map_or(true, |limit| self.tick < limit) {
            interval.tick().await;
            let frame = self.step()?;

            if emit {
                serde_json::to_writer(&mut *out, &frame).context("Failed to encode frame")?;
                writeln!(out).context("Failed to write frame")?;
            }

            if self.tick % u64::from(tps.max(1)) == 0 {
                let summary = self.summary();
                log::debug!(
                    "tick {}: centroid {:?}, {} turning",
                    summary.ticks,
                    summary.centroid,
                    summary.turning
                );
            }
        }

        out.flush().context("Failed to flush frames")?;
        Ok(self.summary())
    }
}

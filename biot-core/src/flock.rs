use crate::agent::{Agent, Navigate};
use crate::config::FollowConfig;
use crate::error::SteeringError;
use crate::follower::TickContext;
use crate::rng::TurnSource;
use crate::steering::{self, Neighbors};
use crate::vector::Vector2D;

#[cfg(feature = "std")]
use crate::agent::AgentKind;
#[cfg(feature = "std")]
use crate::orbiter::Orbiter;

/// Advances every agent once against the same pre-tick snapshot.
fn advance(
    agents: &mut [Agent],
    snapshot: &[Vector2D],
    target: Vector2D,
    config: &FollowConfig,
    rng: &mut dyn TurnSource,
) -> Result<(), SteeringError> {
    let Some(centroid) = steering::centroid(snapshot) else {
        return Ok(());
    };

    for (index, agent) in agents.iter_mut().enumerate() {
        let ctx = TickContext {
            centroid,
            target,
            neighbors: Neighbors::excluding(snapshot, index),
            config,
        };
        agent.navigate(&ctx, rng)?;
    }

    Ok(())
}

/// A fixed-capacity flock for embedded (no_std) environments
pub struct Flock<const N: usize> {
    pub agents: heapless::Vec<Agent, N>,
    pub config: FollowConfig,
}

impl<const N: usize> Flock<N> {
    /// Builds a flock from its full set of agents; the first one past capacity is handed back.
    pub fn from_agents<I>(agents: I, config: FollowConfig) -> Result<Self, Agent>
    where
        I: IntoIterator,
        I::Item: Into<Agent>,
    {
        let mut flock = heapless::Vec::new();
        for agent in agents {
            flock.push(agent.into())?;
        }
        Ok(Self { agents: flock, config })
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn centroid(&self) -> Option<Vector2D> {
        let positions: heapless::Vec<Vector2D, N> =
            self.agents.iter().map(|agent| agent.position()).collect();
        steering::centroid(positions.iter())
    }

    pub fn tick<R: TurnSource>(&mut self, target: Vector2D, rng: &mut R) -> Result<(), SteeringError> {
        let snapshot: heapless::Vec<Vector2D, N> =
            self.agents.iter().map(|agent| agent.position()).collect();
        advance(&mut self.agents, &snapshot, target, &self.config, rng)
    }

    /// Position and heading of every agent, in flock order
    pub fn frames(&self) -> impl Iterator<Item = (Vector2D, f64)> + '_ {
        self.agents.iter().map(|agent| (agent.position(), agent.heading()))
    }
}

/// A collection of agents for std environments
#[cfg(feature = "std")]
pub struct FlockStd {
    pub agents: Vec<Agent>,
    pub config: FollowConfig,
    pub width: f64,
    pub height: f64,
}

#[cfg(feature = "std")]
impl FlockStd {
    /// Spawns `count` agents of one kind at random positions inside the field.
    pub fn new<R>(width: f64, height: f64, count: usize, kind: AgentKind, config: FollowConfig, rng: &mut R) -> Self
    where
        R: TurnSource + ?Sized,
    {
        let agents = (0..count)
            .map(|_| {
                let position = Vector2D::new(rng.range(0.0, width), rng.range(0.0, height));
                Agent::spawn(kind, position, &config, &mut *rng)
            })
            .collect();

        log::debug!("spawned {} {:?} agents in a {}x{} field", count, kind, width, height);

        Self {
            agents,
            config,
            width,
            height,
        }
    }

    /// The eight-planet orbiter preset centred on the middle of the field
    pub fn solar_system<R>(width: f64, height: f64, config: FollowConfig, rng: &mut R) -> Self
    where
        R: TurnSource + ?Sized,
    {
        let centre = Vector2D::new(width / 2.0, height / 2.0);
        let agents = Orbiter::solar_system(centre, rng).into_iter().map(Agent::from).collect();

        Self {
            agents,
            config,
            width,
            height,
        }
    }

    pub fn from_agents(agents: Vec<Agent>, config: FollowConfig) -> Self {
        Self {
            agents,
            config,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn positions(&self) -> Vec<Vector2D> {
        self.agents.iter().map(|agent| agent.position()).collect()
    }

    pub fn centroid(&self) -> Option<Vector2D> {
        steering::centroid(self.positions().iter())
    }

    /// Runs one simulation step toward `target`; an empty flock is left untouched.
    pub fn tick<R: TurnSource>(&mut self, target: Vector2D, rng: &mut R) -> Result<(), SteeringError> {
        let snapshot = self.positions();
        advance(&mut self.agents, &snapshot, target, &self.config, rng)
    }

    pub fn frames(&self) -> impl Iterator<Item = (Vector2D, f64)> + '_ {
        self.agents.iter().map(|agent| (agent.position(), agent.heading()))
    }
}

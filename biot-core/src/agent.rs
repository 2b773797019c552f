use crate::config::FollowConfig;
use crate::dasher::Dasher;
use crate::error::SteeringError;
use crate::follower::{Follower, TickContext};
use crate::orbiter::Orbiter;
use crate::rng::TurnSource;
use crate::vector::Vector2D;

/// Shared contract between every agent variant and the presentation layer
pub trait Navigate {
    fn navigate(&mut self, ctx: &TickContext<'_>, rng: &mut dyn TurnSource) -> Result<(), SteeringError>;
    fn position(&self) -> Vector2D;
    fn heading(&self) -> f64;
}

impl Navigate for Follower {
    fn navigate(&mut self, ctx: &TickContext<'_>, rng: &mut dyn TurnSource) -> Result<(), SteeringError> {
        Follower::navigate(self, ctx, rng)
    }

    fn position(&self) -> Vector2D {
        self.position
    }

    fn heading(&self) -> f64 {
        self.heading
    }
}

impl Navigate for Dasher {
    fn navigate(&mut self, ctx: &TickContext<'_>, rng: &mut dyn TurnSource) -> Result<(), SteeringError> {
        Dasher::navigate(self, ctx.target, ctx.config, rng);
        Ok(())
    }

    fn position(&self) -> Vector2D {
        Dasher::position(self)
    }

    fn heading(&self) -> f64 {
        Dasher::heading(self)
    }
}

impl Navigate for Orbiter {
    fn navigate(&mut self, ctx: &TickContext<'_>, _rng: &mut dyn TurnSource) -> Result<(), SteeringError> {
        Orbiter::navigate(self, ctx.target, ctx.config);
        Ok(())
    }

    fn position(&self) -> Vector2D {
        Orbiter::position(self)
    }

    fn heading(&self) -> f64 {
        Orbiter::heading(self)
    }
}

/// Which variant a flock is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentKind {
    #[default]
    Follower,
    Dasher,
    Orbiter,
}

/// One agent of any variant
#[derive(Debug, Clone)]
pub enum Agent {
    Follower(Follower),
    Dasher(Dasher),
    Orbiter(Orbiter),
}

impl Agent {
    pub fn spawn<R>(kind: AgentKind, position: Vector2D, config: &FollowConfig, rng: &mut R) -> Self
    where
        R: TurnSource + ?Sized,
    {
        match kind {
            AgentKind::Follower => Agent::Follower(Follower::new(position, config)),
            AgentKind::Dasher => Agent::Dasher(Dasher::new(position)),
            AgentKind::Orbiter => Agent::Orbiter(Orbiter::random(position, rng)),
        }
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::Follower(_) => AgentKind::Follower,
            Agent::Dasher(_) => AgentKind::Dasher,
            Agent::Orbiter(_) => AgentKind::Orbiter,
        }
    }

    pub fn as_follower(&self) -> Option<&Follower> {
        match self {
            Agent::Follower(follower) => Some(follower),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Navigate {
        match self {
            Agent::Follower(follower) => follower,
            Agent::Dasher(dasher) => dasher,
            Agent::Orbiter(orbiter) => orbiter,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Navigate {
        match self {
            Agent::Follower(follower) => follower,
            Agent::Dasher(dasher) => dasher,
            Agent::Orbiter(orbiter) => orbiter,
        }
    }
}

impl Navigate for Agent {
    fn navigate(&mut self, ctx: &TickContext<'_>, rng: &mut dyn TurnSource) -> Result<(), SteeringError> {
        self.inner_mut().navigate(ctx, rng)
    }

    fn position(&self) -> Vector2D {
        self.inner().position()
    }

    fn heading(&self) -> f64 {
        self.inner().heading()
    }
}

impl From<Follower> for Agent {
    fn from(follower: Follower) -> Self {
        Agent::Follower(follower)
    }
}

impl From<Dasher> for Agent {
    fn from(dasher: Dasher) -> Self {
        Agent::Dasher(dasher)
    }
}

impl From<Orbiter> for Agent {
    fn from(orbiter: Orbiter) -> Self {
        Agent::Orbiter(orbiter)
    }
}

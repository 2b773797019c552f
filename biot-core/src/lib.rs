#![cfg_attr(not(feature = "std"), no_std)]

//! Steering core for the biot overlay.
//!
//! A [`Flock`] (or [`FlockStd`]) owns a fixed set of agents and advances them
//! once per [`tick`](FlockStd::tick) toward an externally supplied target.
//! Rendering, pointer polling and timers live outside this crate; the flock
//! only hands back `(position, heading)` pairs.

pub mod agent;
pub mod config;
pub mod dasher;
pub mod error;
pub mod flock;
pub mod follower;
pub mod orbiter;
pub mod rng;
pub mod steering;
pub mod vector;

pub use agent::{Agent, AgentKind, Navigate};
pub use config::FollowConfig;
pub use dasher::Dasher;
pub use error::SteeringError;
pub use flock::Flock;
#[cfg(feature = "std")]
pub use flock::FlockStd;
pub use follower::{AvoidanceState, Follower, TickContext};
pub use orbiter::Orbiter;
#[cfg(feature = "std")]
pub use rng::RandSource;
pub use rng::{SimpleRng, TurnSource};
pub use steering::{HeadingAccumulator, Neighbors};
pub use vector::Vector2D;

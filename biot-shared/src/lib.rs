#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use biot_core::{AgentKind, FollowConfig, Vector2D};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents a 2D position in screen coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Vector2D> for Position {
    fn from(v: Vector2D) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Position> for Vector2D {
    fn from(p: Position) -> Self {
        Vector2D::new(p.x, p.y)
    }
}

/// One agent as the presentation layer sees it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentFrame {
    pub x: f64,
    pub y: f64,
    /// Radians
    pub heading: f64,
}

impl AgentFrame {
    pub fn new(position: Vector2D, heading: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            heading,
        }
    }
}

/// Everything drawn for a single tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameUpdate {
    pub tick: u64,
    pub target: Position,
    pub agents: Vec<AgentFrame>,
}

/// Summary reported when a run ends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub agent_count: usize,
    pub centroid: Option<Position>,
    /// Mean follower speed; `None` when the flock has no followers
    pub mean_speed: Option<f64>,
    pub turning: usize,
}

/// Agent variant selected at flock construction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Follower,
    Dasher,
    Orbiter,
    /// The eight-planet orbiter preset
    Solar,
}

impl Variant {
    /// The core agent kind, or `None` for presets that build their own agents
    pub fn agent_kind(self) -> Option<AgentKind> {
        match self {
            Variant::Follower => Some(AgentKind::Follower),
            Variant::Dasher => Some(AgentKind::Dasher),
            Variant::Orbiter => Some(AgentKind::Orbiter),
            Variant::Solar => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("speed bounds must satisfy 0 < min_speed <= base_speed <= max_speed")]
    SpeedBounds,
    #[error("{0} must be positive")]
    NotPositive(&'static str),
    #[error("flock needs at least one agent")]
    NoAgents,
}

/// Tunable simulation settings, loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub agents: usize,
    pub variant: Variant,
    pub width: f64,
    pub height: f64,
    /// Ticks per second
    pub tps: u32,
    pub base_speed: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub speed_increment: f64,
    pub speed_decrement: f64,
    pub max_heading_delta: f64,
    pub cohesion_weight: f64,
    pub goal_weight: f64,
    pub avoidance_weight: f64,
    pub proximity_threshold: f64,
    pub aversion_radius: f64,
    pub dash_radius: f64,
    pub dash_clearance: f64,
    pub dash_attempts: u32,
    pub dash_focus_offset: Position,
    pub orbit_focus_offset: Position,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self::from_config(&FollowConfig::default())
    }
}

impl FlockSettings {
    fn from_config(config: &FollowConfig) -> Self {
        Self {
            agents: 8,
            variant: Variant::Follower,
            width: 1920.0,
            height: 1080.0,
            tps: 60,
            base_speed: config.base_speed,
            min_speed: config.min_speed,
            max_speed: config.max_speed,
            speed_increment: config.speed_increment,
            speed_decrement: config.speed_decrement,
            max_heading_delta: config.max_heading_delta,
            cohesion_weight: config.cohesion_weight,
            goal_weight: config.goal_weight,
            avoidance_weight: config.avoidance_weight,
            proximity_threshold: config.proximity_threshold,
            aversion_radius: config.aversion_radius,
            dash_radius: config.dash_radius,
            dash_clearance: config.dash_clearance,
            dash_attempts: config.dash_attempts,
            dash_focus_offset: config.dash_focus_offset.into(),
            orbit_focus_offset: config.orbit_focus_offset.into(),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.agents == 0 {
            return Err(SettingsError::NoAgents);
        }
        if !(self.min_speed > 0.0 && self.min_speed <= self.base_speed && self.base_speed <= self.max_speed) {
            return Err(SettingsError::SpeedBounds);
        }
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("tps", self.tps as f64),
            ("max_heading_delta", self.max_heading_delta),
            ("proximity_threshold", self.proximity_threshold),
            ("aversion_radius", self.aversion_radius),
            ("dash_radius", self.dash_radius),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(SettingsError::NotPositive(name));
            }
        }
        Ok(())
    }

    pub fn config(&self) -> FollowConfig {
        FollowConfig {
            base_speed: self.base_speed,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            speed_increment: self.speed_increment,
            speed_decrement: self.speed_decrement,
            max_heading_delta: self.max_heading_delta,
            cohesion_weight: self.cohesion_weight,
            goal_weight: self.goal_weight,
            avoidance_weight: self.avoidance_weight,
            proximity_threshold: self.proximity_threshold,
            aversion_radius: self.aversion_radius,
            dash_focus_offset: self.dash_focus_offset.into(),
            dash_radius: self.dash_radius,
            dash_clearance: self.dash_clearance,
            dash_attempts: self.dash_attempts,
            orbit_focus_offset: self.orbit_focus_offset.into(),
        }
    }

    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[cfg(feature = "std")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

use crate::vector::Vector2D;

/// Configuration for every agent variant in the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowConfig {
    /// Speed a freshly created follower starts with
    pub base_speed: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Per-tick speed gain while heading for the target
    pub speed_increment: f64,
    /// Per-tick speed loss while circling the target
    pub speed_decrement: f64,
    /// Heading change (radians) at which turning fully cancels speed growth
    pub max_heading_delta: f64,
    pub cohesion_weight: f64,
    pub goal_weight: f64,
    pub avoidance_weight: f64,
    /// Distance to the target at which a follower starts circling it
    pub proximity_threshold: f64,
    /// Distance under which a neighbour pushes a follower away
    pub aversion_radius: f64,
    /// Offset from the target to the point dashers dash around
    pub dash_focus_offset: Vector2D,
    pub dash_radius: f64,
    /// Minimum distance a dash segment keeps from the dash focus
    pub dash_clearance: f64,
    pub dash_attempts: u32,
    /// Offset from the target to the centre of orbiter ellipses
    pub orbit_focus_offset: Vector2D,
}

impl FollowConfig {
    /// Builds a config around `base_speed`, with the speed bounds at half and double of it.
    pub fn with_base_speed(base_speed: f64) -> Self {
        Self {
            base_speed,
            min_speed: base_speed * 0.5,
            max_speed: base_speed * 2.0,
            ..Self::default()
        }
    }

    pub fn clamp_speed(&self, speed: f64) -> f64 {
        speed.max(self.min_speed).min(self.max_speed)
    }
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            base_speed: 2.0,
            min_speed: 1.0,
            max_speed: 4.0,
            speed_increment: 0.05,
            speed_decrement: 0.1,
            max_heading_delta: core::f64::consts::FRAC_PI_8,
            cohesion_weight: 0.05,
            goal_weight: 0.05,
            avoidance_weight: 0.7,
            proximity_threshold: 25.0,
            aversion_radius: 25.0,
            dash_focus_offset: Vector2D::new(-32.0, 0.0),
            dash_radius: 62.5,
            dash_clearance: 15.0,
            dash_attempts: 50,
            orbit_focus_offset: Vector2D::new(-65.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_speed_bounds() {
        let config = FollowConfig::default();
        assert_eq!(config.min_speed, config.base_speed * 0.5);
        assert_eq!(config.max_speed, config.base_speed * 2.0);
    }

    #[test]
    fn test_with_base_speed() {
        let config = FollowConfig::with_base_speed(3.0);
        assert_eq!(config.min_speed, 1.5);
        assert_eq!(config.max_speed, 6.0);
        assert_eq!(config.goal_weight, FollowConfig::default().goal_weight);
    }

    #[test]
    fn test_clamp_speed() {
        let config = FollowConfig::default();
        assert_eq!(config.clamp_speed(0.0), 1.0);
        assert_eq!(config.clamp_speed(9.0), 4.0);
        assert_eq!(config.clamp_speed(2.5), 2.5);
    }
}

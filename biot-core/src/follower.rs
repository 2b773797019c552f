use crate::config::FollowConfig;
use crate::error::SteeringError;
use crate::rng::TurnSource;
use crate::steering::{self, HeadingAccumulator, Neighbors};
use crate::vector::{angle_between, Vector2D};

/// Whether goal-seeking heads straight for the target or circles it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvoidanceState {
    #[default]
    Normal,
    TurningLeft,
    TurningRight,
}

impl AvoidanceState {
    pub fn is_turning(self) -> bool {
        self != AvoidanceState::Normal
    }
}

/// Everything an agent may read while it is being steered for one tick
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub centroid: Vector2D,
    pub target: Vector2D,
    pub neighbors: Neighbors<'a>,
    pub config: &'a FollowConfig,
}

/// A flocking agent steering toward the target while keeping clear of its neighbours
#[derive(Debug, Clone)]
pub struct Follower {
    pub position: Vector2D,
    pub heading: f64,
    speed: f64,
    state: AvoidanceState,
    accumulator: HeadingAccumulator,
}

impl Follower {
    pub fn new(position: Vector2D, config: &FollowConfig) -> Self {
        Self {
            position,
            heading: 0.0,
            speed: config.base_speed,
            state: AvoidanceState::Normal,
            accumulator: HeadingAccumulator::default(),
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn state(&self) -> AvoidanceState {
        self.state
    }

    /// Steers and moves the follower for one tick.
    ///
    /// Cohesion and goal-seeking always contribute, separation only when a
    /// neighbour is within the aversion radius.
    pub fn navigate<R>(&mut self, ctx: &TickContext<'_>, rng: &mut R) -> Result<(), SteeringError>
    where
        R: TurnSource + ?Sized,
    {
        if !self.accumulator.is_empty() {
            return Err(SteeringError::DanglingAccumulator {
                count: self.accumulator.count(),
            });
        }
        let config = ctx.config;

        self.accumulator
            .fold(steering::cohesion(self.position, ctx.centroid), config.cohesion_weight);

        let goal = self.seek_target(ctx.target, config, rng);
        self.accumulator.fold(goal, config.goal_weight);

        if let Some(away) =
            steering::separation(self.position, ctx.neighbors.iter(), config.aversion_radius)
        {
            self.accumulator.fold(away, config.avoidance_weight);
        }

        self.finalize_heading(config)?;

        self.position += Vector2D::from_angle(self.heading) * self.speed;
        Ok(())
    }

    /// Goal direction for this tick, rotated a quarter turn while circling the target.
    fn seek_target<R>(&mut self, target: Vector2D, config: &FollowConfig, rng: &mut R) -> Vector2D
    where
        R: TurnSource + ?Sized,
    {
        let (direction, distance) = steering::seek(self.position, target);

        if self.state == AvoidanceState::Normal && distance <= config.proximity_threshold {
            self.state = if rng.flip() {
                AvoidanceState::TurningLeft
            } else {
                AvoidanceState::TurningRight
            };
            log::trace!("follower at {:?} started {:?}", self.position, self.state);
        }

        let direction = match self.state {
            AvoidanceState::Normal => {
                self.speed = (self.speed + config.speed_increment).min(config.max_speed);
                direction
            }
            AvoidanceState::TurningLeft => {
                self.brake(config);
                direction.rotate_left()
            }
            AvoidanceState::TurningRight => {
                self.brake(config);
                direction.rotate_right()
            }
        };

        if distance > config.proximity_threshold && self.state.is_turning() {
            log::trace!("follower at {:?} left the target, back to normal", self.position);
            self.state = AvoidanceState::Normal;
        }

        direction
    }

    // Slows toward the base rate; the floor is the global minimum.
    fn brake(&mut self, config: &FollowConfig) {
        if self.speed > config.base_speed {
            self.speed = (self.speed - config.speed_decrement).max(config.min_speed);
        }
    }

    fn finalize_heading(&mut self, config: &FollowConfig) -> Result<(), SteeringError> {
        let average = self.accumulator.finalize()?;
        let previous = self.heading;

        let blended = (average + Vector2D::from_angle(previous)) / 2.0;
        self.heading = blended.angle();

        if config.max_heading_delta > 0.0 {
            let delta = angle_between(previous, self.heading).min(config.max_heading_delta);
            self.speed -= config.speed_increment * delta / config.max_heading_delta;
        }
        self.speed = config.clamp_speed(self.speed);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    fn context<'a>(config: &'a FollowConfig, centroid: Vector2D, target: Vector2D) -> TickContext<'a> {
        TickContext {
            centroid,
            target,
            neighbors: Neighbors::none(),
            config,
        }
    }

    /// Always answers the same coin flip
    struct Fixed(bool);

    impl TurnSource for Fixed {
        fn unit(&mut self) -> f64 {
            if self.0 {
                0.0
            } else {
                0.99
            }
        }
    }

    #[test]
    fn test_follower_creation() {
        let config = FollowConfig::default();
        let follower = Follower::new(Vector2D::new(10.0, 20.0), &config);

        assert_eq!(follower.position, Vector2D::new(10.0, 20.0));
        assert_eq!(follower.heading, 0.0);
        assert_eq!(follower.speed(), config.base_speed);
        assert_eq!(follower.state(), AvoidanceState::Normal);
    }

    #[test]
    fn test_straight_run_moves_by_speed() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::zero(), &config);
        let ctx = context(&config, Vector2D::zero(), Vector2D::new(100.0, 0.0));

        follower.navigate(&ctx, &mut SimpleRng::new(1)).unwrap();

        assert_eq!(follower.heading, 0.0);
        assert_eq!(follower.speed(), config.base_speed + config.speed_increment);
        assert_eq!(follower.position.x, follower.speed());
        assert_eq!(follower.position.y, 0.0);
    }

    #[test]
    fn test_turn_left_rotates_goal_counter_clockwise() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::zero(), &config);
        let ctx = context(&config, Vector2D::zero(), Vector2D::new(10.0, 0.0));

        follower.navigate(&ctx, &mut Fixed(true)).unwrap();

        assert_eq!(follower.state(), AvoidanceState::TurningLeft);
        assert!(follower.heading > 0.0);
    }

    #[test]
    fn test_turn_right_rotates_goal_clockwise() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::zero(), &config);
        let ctx = context(&config, Vector2D::zero(), Vector2D::new(10.0, 0.0));

        follower.navigate(&ctx, &mut Fixed(false)).unwrap();

        assert_eq!(follower.state(), AvoidanceState::TurningRight);
        assert!(follower.heading < 0.0);
    }

    #[test]
    fn test_turning_brakes_toward_base() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::zero(), &config);
        follower.speed = config.max_speed;
        follower.state = AvoidanceState::TurningLeft;
        let ctx = context(&config, Vector2D::zero(), Vector2D::new(5.0, 0.0));

        follower.navigate(&ctx, &mut Fixed(true)).unwrap();

        assert!(follower.speed() < config.max_speed);
        assert!(follower.speed() >= config.min_speed);
    }

    #[test]
    fn test_turning_tick_from_max_speed_exact() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::zero(), &config);
        follower.speed = config.max_speed;
        follower.state = AvoidanceState::TurningLeft;
        let ctx = context(&config, Vector2D::zero(), Vector2D::new(5.0, 0.0));

        follower.navigate(&ctx, &mut Fixed(true)).unwrap();

        // Cohesion is zero, the goal is rotated to (0, 1), momentum keeps (1, 0)
        let expected_heading = (config.goal_weight / 4.0).atan2(0.5);
        let delta = expected_heading.min(config.max_heading_delta);
        let expected_speed = config.max_speed
            - config.speed_decrement
            - config.speed_increment * delta / config.max_heading_delta;
        assert!((follower.heading - expected_heading).abs() < 1e-12);
        assert!((follower.speed() - expected_speed).abs() < 1e-12);
    }

    #[test]
    fn test_sharp_turn_cancels_speed_growth() {
        let config = FollowConfig {
            goal_weight: 2.0,
            ..FollowConfig::default()
        };
        let mut follower = Follower::new(Vector2D::zero(), &config);
        follower.heading = core::f64::consts::PI;
        let ctx = context(&config, Vector2D::zero(), Vector2D::new(0.0, -100.0));

        follower.navigate(&ctx, &mut SimpleRng::new(1)).unwrap();

        assert_eq!(follower.state(), AvoidanceState::Normal);
        assert!(angle_between(core::f64::consts::PI, follower.heading) >= config.max_heading_delta);
        assert!((follower.speed() - config.base_speed).abs() < 1e-12);
    }

    #[test]
    fn test_gentle_turn_keeps_part_of_growth() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::zero(), &config);
        let ctx = context(&config, Vector2D::zero(), Vector2D::new(0.0, 100.0));

        follower.navigate(&ctx, &mut SimpleRng::new(1)).unwrap();

        let delta = follower.heading.abs();
        assert!(delta > 0.0 && delta < config.max_heading_delta);
        assert!(follower.speed() > config.base_speed);
        assert!(follower.speed() < config.base_speed + config.speed_increment);
    }

    #[test]
    fn test_turning_at_base_does_not_brake() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::zero(), &config);
        follower.state = AvoidanceState::TurningRight;
        let before = follower.speed();

        follower.brake(&config);

        assert_eq!(follower.speed(), before);
    }

    #[test]
    fn test_separation_dominates_heading() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::zero(), &config);
        let others = [Vector2D::new(5.0, 2.0)];
        let ctx = TickContext {
            centroid: Vector2D::zero(),
            target: Vector2D::new(500.0, 0.0),
            neighbors: Neighbors::all(&others),
            config: &config,
        };

        follower.navigate(&ctx, &mut SimpleRng::new(3)).unwrap();

        // The neighbour ahead and to the left outweighs the goal straight ahead
        assert!(follower.heading < 0.0);
    }

    #[test]
    fn test_dangling_accumulator_is_error() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::zero(), &config);
        follower.accumulator.fold(Vector2D::new(1.0, 0.0), 1.0);
        let ctx = context(&config, Vector2D::zero(), Vector2D::new(100.0, 0.0));

        let result = follower.navigate(&ctx, &mut SimpleRng::new(1));

        assert_eq!(result, Err(SteeringError::DanglingAccumulator { count: 1 }));
    }

    #[test]
    fn test_finalize_without_contributions_is_error() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::zero(), &config);

        assert_eq!(
            follower.finalize_heading(&config),
            Err(SteeringError::EmptyAccumulator)
        );
    }

    #[test]
    fn test_accumulator_consumed_after_navigate() {
        let config = FollowConfig::default();
        let mut follower = Follower::new(Vector2D::new(3.0, 3.0), &config);
        let ctx = context(&config, Vector2D::new(50.0, 0.0), Vector2D::new(-80.0, 10.0));

        follower.navigate(&ctx, &mut SimpleRng::new(1)).unwrap();

        assert!(follower.accumulator.is_empty());
    }
}

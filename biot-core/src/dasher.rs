use crate::config::FollowConfig;
use crate::rng::TurnSource;
use crate::vector::Vector2D;

/// Number of waypoints a dasher remembers for its trail
pub const DASH_TRAIL: usize = 3;

/// An agent that jumps between random points on a circle around the target
#[derive(Debug, Clone)]
pub struct Dasher {
    trail: [Vector2D; DASH_TRAIL],
    cursor: usize,
}

impl Dasher {
    pub fn new(position: Vector2D) -> Self {
        Self {
            trail: [position; DASH_TRAIL],
            cursor: 0,
        }
    }

    pub fn position(&self) -> Vector2D {
        self.trail[self.cursor]
    }

    /// Direction of the last dash
    pub fn heading(&self) -> f64 {
        (self.trail[self.cursor] - self.trail[self.previous()]).angle()
    }

    /// Waypoints from oldest to newest, for drawing the fading trail behind the dasher
    pub fn trail(&self) -> impl Iterator<Item = Vector2D> + '_ {
        (1..=DASH_TRAIL).map(move |i| self.trail[(self.cursor + i) % DASH_TRAIL])
    }

    /// Picks the next waypoint, retrying while the dash would cut across the focus.
    pub fn navigate<R>(&mut self, target: Vector2D, config: &FollowConfig, rng: &mut R)
    where
        R: TurnSource + ?Sized,
    {
        self.cursor = (self.cursor + 1) % DASH_TRAIL;
        let focus = target + config.dash_focus_offset;

        for _ in 0..config.dash_attempts {
            let degrees = rng.range_inclusive(0, 360) as f64;
            let heading = degrees * core::f64::consts::PI / 180.0;
            self.trail[self.cursor] = focus + Vector2D::from_angle(heading) * config.dash_radius;
            if !self.crosses(focus, config.dash_clearance) {
                break;
            }
        }
    }

    fn previous(&self) -> usize {
        (self.cursor + DASH_TRAIL - 1) % DASH_TRAIL
    }

    /// Whether the line through the last two waypoints passes within `radius` of `center`
    fn crosses(&self, center: Vector2D, radius: f64) -> bool {
        let p1 = self.trail[self.cursor];
        let p2 = self.trail[self.previous()];
        let segment = p2 - p1;
        let length = segment.magnitude();
        if length == 0.0 {
            return false;
        }
        let offset = center - p1;
        let cross = offset.x * segment.y - offset.y * segment.x;
        (cross / length).abs() <= radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    #[test]
    fn test_waypoints_on_dash_circle() {
        let config = FollowConfig::default();
        let target = Vector2D::new(200.0, 150.0);
        let focus = target + config.dash_focus_offset;
        let mut dasher = Dasher::new(Vector2D::zero());
        let mut rng = SimpleRng::new(11);

        for _ in 0..20 {
            dasher.navigate(target, &config, &mut rng);
            let radius = dasher.position().distance(&focus);
            assert!((radius - config.dash_radius).abs() < 1e-9);
        }
    }

    #[test]
    fn test_trail_ends_at_position() {
        let config = FollowConfig::default();
        let mut dasher = Dasher::new(Vector2D::zero());
        let mut rng = SimpleRng::new(5);

        dasher.navigate(Vector2D::new(100.0, 100.0), &config, &mut rng);
        dasher.navigate(Vector2D::new(100.0, 100.0), &config, &mut rng);

        let trail: Vec<_> = dasher.trail().collect();
        assert_eq!(trail.len(), DASH_TRAIL);
        assert_eq!(trail[DASH_TRAIL - 1], dasher.position());
    }

    #[test]
    fn test_accepted_dash_clears_focus() {
        let config = FollowConfig::default();
        let target = Vector2D::new(0.0, 0.0);
        let focus = target + config.dash_focus_offset;
        let mut dasher = Dasher::new(focus + Vector2D::new(config.dash_radius, 0.0));
        let mut rng = SimpleRng::new(23);

        dasher.navigate(target, &config, &mut rng);

        assert!(!dasher.crosses(focus, config.dash_clearance));
    }

    #[test]
    fn test_crosses_detects_line_through_center() {
        let mut dasher = Dasher::new(Vector2D::new(-10.0, 0.0));
        dasher.cursor = 1;
        dasher.trail[1] = Vector2D::new(10.0, 0.0);

        assert!(dasher.crosses(Vector2D::zero(), 1.0));
        assert!(!dasher.crosses(Vector2D::new(0.0, 5.0), 1.0));
    }
}

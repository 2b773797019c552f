use crate::config::FollowConfig;
use crate::rng::TurnSource;
use crate::vector::{rem_euclid, sin_cos, Vector2D};

/// Angle units per full orbit (sixteenths of a degree)
pub const FULL_ORBIT: f64 = 5760.0;

const RATES: [f64; 8] = [0.25, 0.5, 1.0, 1.25, 1.5, 2.0, 3.0, 5.0];

/// An agent on a fixed elliptical orbit around the target
#[derive(Debug, Clone)]
pub struct Orbiter {
    /// Sixteenths of a degree, in `[0, FULL_ORBIT)`
    pub angle: f64,
    /// Degrees advanced per tick
    pub rate: f64,
    pub major: f64,
    pub minor: f64,
    /// Drawing radius; not used by the simulation
    pub size: f64,
    focus: Vector2D,
}

impl Orbiter {
    pub fn new(rate: f64, size: f64, major: f64, minor: f64) -> Self {
        Self {
            angle: 0.0,
            rate,
            major,
            minor,
            size,
            focus: Vector2D::zero(),
        }
    }

    pub fn random<R>(focus: Vector2D, rng: &mut R) -> Self
    where
        R: TurnSource + ?Sized,
    {
        let major = rng.range_inclusive(0, 100) as f64;
        let minor = major + rng.range_inclusive(-5, 5) as f64;
        let rate = RATES[rng.range_inclusive(0, RATES.len() as i32 - 1) as usize];
        let mut orbiter = Self::new(rate, 3.0, major, minor);
        orbiter.angle = rem_euclid(rng.range_inclusive(0, FULL_ORBIT as i32) as f64, FULL_ORBIT);
        orbiter.focus = focus;
        orbiter
    }

    /// The eight planets, innermost first, at random starting angles
    pub fn solar_system<R>(focus: Vector2D, rng: &mut R) -> [Self; 8]
    where
        R: TurnSource + ?Sized,
    {
        let mut planets = [
            Self::new(4.0, 1.0, 29.0, 28.0),
            Self::new(1.5, 3.0, 53.0, 53.0),
            Self::new(1.0, 3.0, 76.0, 75.0),
            Self::new(1.0, 2.0, 100.0, 99.0),
            Self::new(0.09, 10.0, 195.0, 195.0),
            Self::new(0.03, 9.0, 253.0, 253.0),
            Self::new(0.01, 6.0, 327.0, 327.0),
            Self::new(0.007, 5.0, 382.0, 382.0),
        ];
        for planet in planets.iter_mut() {
            planet.angle = rem_euclid(rng.range_inclusive(0, FULL_ORBIT as i32) as f64, FULL_ORBIT);
            planet.focus = focus;
        }
        planets
    }

    pub fn navigate(&mut self, target: Vector2D, config: &FollowConfig) {
        self.focus = target + config.orbit_focus_offset;
        self.angle = rem_euclid(self.angle + 16.0 * self.rate, FULL_ORBIT);
    }

    fn theta(&self) -> f64 {
        self.angle / 16.0 * core::f64::consts::PI / 180.0
    }

    pub fn position(&self) -> Vector2D {
        let (sin, cos) = sin_cos(self.theta());
        self.focus + Vector2D::new(self.major * cos, self.minor * sin)
    }

    /// Tangent of the ellipse in the direction of travel
    pub fn heading(&self) -> f64 {
        let (sin, cos) = sin_cos(self.theta());
        Vector2D::new(-self.major * sin, self.minor * cos).angle()
    }
}

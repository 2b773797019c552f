/// A 2D vector used for positions, headings and steering contributions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing along `angle` (radians)
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = sin_cos(angle);
        Self { x: cos, y: sin }
    }

    pub fn magnitude(&self) -> f64 {
        sqrt(self.magnitude_squared())
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Returns the unit vector, or the zero vector when the length is zero.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f64 {
        (*self - *other).magnitude()
    }

    pub fn distance_squared(&self, other: &Vector2D) -> f64 {
        (*self - *other).magnitude_squared()
    }

    /// Direction of the vector in radians, in `(-PI, PI]`
    pub fn angle(&self) -> f64 {
        atan2(self.y, self.x)
    }

    /// Quarter turn counter-clockwise: `(x, y) -> (-y, x)`
    pub fn rotate_left(&self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Quarter turn clockwise: `(x, y) -> (y, -x)`
    pub fn rotate_right(&self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f64> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

pub(crate) fn sqrt(value: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrt(value)
    }
}

pub(crate) fn atan2(y: f64, x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2(y, x)
    }
}

pub(crate) fn sin_cos(angle: f64) -> (f64, f64) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sincos(angle)
    }
}

pub(crate) fn rem_euclid(value: f64, modulus: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        value.rem_euclid(modulus)
    }
    #[cfg(not(feature = "std"))]
    {
        let r = libm::fmod(value, modulus);
        if r < 0.0 {
            r + modulus
        } else {
            r
        }
    }
}

/// Absolute angular difference between two headings, folded into `[0, PI]`
pub fn angle_between(from: f64, to: f64) -> f64 {
    let diff = rem_euclid(to - from, core::f64::consts::TAU);
    if diff > core::f64::consts::PI {
        core::f64::consts::TAU - diff
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!(v.magnitude_squared(), 25.0);
    }

    #[test]
    fn test_vector2d_normalize() {
        let v = Vector2D::new(3.0, 4.0);
        let normalized = v.normalize();
        assert!((normalized.magnitude() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vector2D::zero().normalize(), Vector2D::zero());
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        assert_eq!(v1 + v2, Vector2D::new(4.0, 6.0));
        assert_eq!(v2 - v1, Vector2D::new(2.0, 2.0));
        assert_eq!(v1 * 2.0, Vector2D::new(2.0, 4.0));
        assert_eq!(v2 / 2.0, Vector2D::new(1.5, 2.0));
    }

    #[test]
    fn test_quarter_turns() {
        let v = Vector2D::new(1.0, 0.0);
        assert_eq!(v.rotate_left(), Vector2D::new(0.0, 1.0));
        assert_eq!(v.rotate_right(), Vector2D::new(0.0, -1.0));

        let w = Vector2D::new(2.0, 3.0);
        assert_eq!(w.rotate_left(), Vector2D::new(-3.0, 2.0));
        assert_eq!(w.rotate_right(), Vector2D::new(3.0, -2.0));
    }

    #[test]
    fn test_angle_between_wraps() {
        assert!((angle_between(0.0, FRAC_PI_2) - FRAC_PI_2).abs() < 1e-12);
        assert!((angle_between(PI - 0.1, -PI + 0.1) - 0.2).abs() < 1e-9);
        assert_eq!(angle_between(1.0, 1.0), 0.0);
    }
}

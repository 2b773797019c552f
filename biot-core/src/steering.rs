//! Steering rules shared by the follower variant.
//!
//! Every rule returns a unit vector (or the zero vector when the reference
//! point coincides with the agent). Weighting happens in the accumulator.

use crate::error::SteeringError;
use crate::vector::Vector2D;

/// Read-only view of the pre-tick positions of the flock, minus the agent being steered
#[derive(Debug, Clone, Copy)]
pub struct Neighbors<'a> {
    positions: &'a [Vector2D],
    own: Option<usize>,
}

impl<'a> Neighbors<'a> {
    /// Every position except the one at index `own`
    pub fn excluding(positions: &'a [Vector2D], own: usize) -> Self {
        Self {
            positions,
            own: Some(own),
        }
    }

    /// Every position in the slice
    pub fn all(positions: &'a [Vector2D]) -> Self {
        Self {
            positions,
            own: None,
        }
    }

    pub fn none() -> Self {
        Self::all(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Vector2D> + 'a {
        let own = self.own;
        self.positions
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != own)
            .map(|(_, position)| position)
    }
}

/// Transient per-tick sum of weighted unit vectors
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadingAccumulator {
    sum: Vector2D,
    count: u32,
}

impl HeadingAccumulator {
    pub fn fold(&mut self, direction: Vector2D, weight: f64) {
        self.sum += direction * weight;
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Averages the folded vectors and clears the accumulator.
    pub fn finalize(&mut self) -> Result<Vector2D, SteeringError> {
        if self.count == 0 {
            return Err(SteeringError::EmptyAccumulator);
        }
        let average = self.sum / self.count as f64;
        *self = Self::default();
        Ok(average)
    }
}

/// Unit vector from `position` towards the flock centroid
pub fn cohesion(position: Vector2D, centroid: Vector2D) -> Vector2D {
    (centroid - position).normalize()
}

/// Unit vector from `position` towards the target, with the distance to it
pub fn seek(position: Vector2D, target: Vector2D) -> (Vector2D, f64) {
    let offset = target - position;
    (offset.normalize(), offset.magnitude())
}

/// Picks the neighbour to steer away from.
///
/// Neighbours outside the aversion box or circle are ignored. The first
/// survivor is kept unless a later one is closer on both axes at once, which
/// is not the same as the Euclidean nearest.
pub fn select_closest<'a, I>(position: Vector2D, neighbors: I, aversion_radius: f64) -> Option<Vector2D>
where
    I: Iterator<Item = &'a Vector2D>,
{
    let aversion_squared = aversion_radius * aversion_radius;
    let mut closest: Option<(Vector2D, f64, f64)> = None;

    for other in neighbors {
        let dx = (other.x - position.x).abs();
        let dy = (other.y - position.y).abs();
        if dx > aversion_radius || dy > aversion_radius {
            continue;
        }
        if position.distance_squared(other) > aversion_squared {
            continue;
        }

        match closest {
            Some((_, best_dx, best_dy)) if !(dx < best_dx && dy < best_dy) => {}
            _ => closest = Some((*other, dx, dy)),
        }
    }

    closest.map(|(other, _, _)| other)
}

/// Unit vector pointing away from the selected neighbour, if any is within range
pub fn separation<'a, I>(position: Vector2D, neighbors: I, aversion_radius: f64) -> Option<Vector2D>
where
    I: Iterator<Item = &'a Vector2D>,
{
    select_closest(position, neighbors, aversion_radius).map(|other| (position - other).normalize())
}

/// Arithmetic mean of the positions, `None` for an empty set
pub fn centroid<'a, I>(positions: I) -> Option<Vector2D>
where
    I: IntoIterator<Item = &'a Vector2D>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0usize;
    for position in positions {
        sum += *position;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Source of randomness threaded through the flock.
///
/// Agents never reach for a global generator; the caller hands one in so a
/// seeded source makes every tick reproducible.
pub trait TurnSource {
    /// Uniform float in `[0.0, 1.0)`
    fn unit(&mut self) -> f64;

    /// Fair coin flip
    fn flip(&mut self) -> bool {
        self.unit() < 0.5
    }

    /// Uniform float in `[min, max)`
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.unit() * (max - min)
    }

    /// Uniform integer in `[min, max]`
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let span = (max - min + 1) as f64;
        let offset = (self.unit() * span) as i32;
        min + offset.min(max - min)
    }
}

/// Simple pseudo-random number generator using LCG (Linear Congruential Generator)
/// Usable without `std`; not suitable for anything beyond simulation jitter
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        // LCG parameters from Numerical Recipes
        const A: u32 = 1664525;
        const C: u32 = 1013904223;

        self.state = self.state.wrapping_mul(A).wrapping_add(C);
        self.state
    }
}

impl TurnSource for SimpleRng {
    fn unit(&mut self) -> f64 {
        (self.next_u32() as f64) / (u32::MAX as f64 + 1.0)
    }

    // Low LCG bits alternate, so use the top bit.
    fn flip(&mut self) -> bool {
        self.next_u32() & 0x8000_0000 != 0
    }
}

/// Adapts any `rand` generator into a [`TurnSource`]
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct RandSource<R>(pub R);

#[cfg(feature = "std")]
impl<R: rand::Rng> TurnSource for RandSource<R> {
    fn unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn flip(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }

    fn range(&mut self, min: f64, max: f64) -> f64 {
        if min < max {
            self.0.gen_range(min..max)
        } else {
            min
        }
    }

    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        self.0.gen_range(min..=max)
    }
}

#[cfg(feature = "std")]
impl RandSource<rand::rngs::StdRng> {
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

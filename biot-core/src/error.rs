use thiserror::Error;

/// Structural errors in the steering protocol.
///
/// These only occur when the per-tick composition steps run out of order;
/// degenerate geometry never produces an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SteeringError {
    #[error("heading finalized with no steering contributions")]
    EmptyAccumulator,

    #[error("tick started with {count} unconsumed steering contributions")]
    DanglingAccumulator { count: u32 },
}

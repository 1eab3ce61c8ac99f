use thiserror::Error;

/// Errors surfaced to the host application.
///
/// Deferred work (template not applied, no items, not yet sized) is never an error: those paths
/// return `Ok(())` and wait for the next layout or scroll signal.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SelectorError {
    /// A visual or logical index outside the collection while looping is off (or the collection
    /// is empty).
    #[error("index {index} is out of range for {count} items")]
    InvalidIndex { index: i64, count: usize },

    /// Scroll percentages must be within `0.0..=100.0`.
    #[error("scroll percent {0} is outside 0..=100")]
    InvalidScrollPercent(f64),

    /// The item pool could not grow.
    #[error("item pool allocation failed")]
    Allocation,

    /// The operation needs a templated, populated, and sized selector.
    #[error("the selector is not set up yet")]
    NotReady,
}

pub type Result<T, E = SelectorError> = core::result::Result<T, E>;

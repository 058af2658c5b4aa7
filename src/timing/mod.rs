//! Zero-cost timing instrumentation for the distributed coordinator.
//!
//! When the `timing` feature is enabled, the root collects wall-clock
//! durations for each coordinator phase and reports them through `log`.
//!
//! When disabled, all types become zero-sized and all methods compile away.

#[cfg(feature = "timing")]
mod real;
#[cfg(not(feature = "timing"))]
mod stub;

#[cfg(feature = "timing")]
pub use real::*;
#[cfg(not(feature = "timing"))]
pub use stub::*;

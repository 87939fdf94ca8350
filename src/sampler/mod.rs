//! Platform samplers for process resource metrics.
//!
//! A sampler takes one instantaneous snapshot of its metric family using the
//! current platform's native facilities. Samplers never return errors:
//! unsupported platforms, permission failures, and parse failures all yield
//! the zero snapshot for that sample, so a momentarily-zero metric can never
//! take down the logging pipeline that asked for it.

pub mod io;
pub mod memory;

pub use io::IoSampler;
pub use memory::MemorySampler;

use crate::snapshot::Snapshot;

/// One instantaneous measurement of a metric family.
///
/// `sample` is infallible by contract; failing measurement paths are
/// absorbed into zero-valued fields at this boundary.
pub trait Sampler {
    type Output: Snapshot;

    fn sample(&self) -> Self::Output;
}

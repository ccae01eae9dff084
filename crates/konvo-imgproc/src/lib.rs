#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// neighborhood extraction module.
pub mod crop;

/// error types for the image processing operations.
pub mod error;

/// image filtering module.
pub mod filter;

/// compute image histogram module.
pub mod histogram;

/// synthetic noise injection module.
pub mod noise;

/// operations to normalize images.
pub mod normalize;

/// image border padding module.
pub mod padding;

/// module containing parallelization utilities.
pub mod parallel;

/// segmentation algorithms module.
pub mod segmentation;

/// operations to threshold images.
pub mod threshold;

pub use crate::error::ImgProcError;

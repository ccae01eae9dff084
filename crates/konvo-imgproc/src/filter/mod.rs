//! Filter operations
//!
//! This module provides spatial filtering operations for image processing.

/// Kernel types and parametric kernel generation.
pub mod kernels;
pub use kernels::{generate_filter, FilterSpec, Kernel};

/// The 2D convolution engine.
mod convolution;
pub use convolution::*;

/// Filter operations built on the convolution engine.
mod ops;
pub use ops::*;

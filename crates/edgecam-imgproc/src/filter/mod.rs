//! Filter operations
//!
//! This module provides the Sobel edge detector and its kernels.

/// Filter kernels
pub mod kernels;

/// Edge detection operations
mod edge;
pub use edge::*;

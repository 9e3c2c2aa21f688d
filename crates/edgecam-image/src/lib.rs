#![deny(missing_docs)]
//! Image types for grayscale camera frames

/// image representation for computer vision purposes.
pub mod image;

/// borrowed, strided grayscale views.
pub mod view;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::view::GrayView;

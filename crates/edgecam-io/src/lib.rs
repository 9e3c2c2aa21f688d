#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// Frame rate counter for video processing.
///
/// Track and measure frames per second (FPS) while processing camera frames.
pub mod fps_counter;

/// High-level image reading functions.
///
/// See [`functional::read_image_any`] for automatic format detection.
pub mod functional;

/// PNG image encoding and decoding.
///
/// Read and write 8-bit grayscale PNG images.
pub mod png;

pub use crate::error::IoError;

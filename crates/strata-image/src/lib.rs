#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// image representation for computer vision purposes.
pub mod image;

/// Fixed-size image description shared between participants.
pub mod metadata;

/// Operations combining several images.
pub mod ops;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::metadata::{ImageMetadata, SampleDepth};

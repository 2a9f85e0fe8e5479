#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// morphological operations module.
pub mod morphology;

/// row partitioning of an image across a group of participants.
pub mod partition;

/// utilities to iterate over image pixels.
pub mod pixels;

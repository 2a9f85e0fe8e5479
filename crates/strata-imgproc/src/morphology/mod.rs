// Morphological image processing operations.

/// Dilation restricted to the rows owned by one participant.
pub mod dilate;

/// Structuring elements.
pub mod kernel;

pub use dilate::{dilate, dilate_partition};
pub use kernel::{KernelShape, StructuringElement};

use crate::partition::PartitionError;
use strata_image::ImageError;

/// Errors related to morphological operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MorphologyError {
    /// The structuring element has a zero dimension.
    #[error("structuring element must have non-zero width and height")]
    EmptyKernel,

    /// The number of cells does not match the dimensions.
    #[error("structuring element has {0} cells, expected {1}")]
    InvalidDataLength(usize, usize),

    /// The partition plan was made for an image of a different height.
    #[error("partition plan covers {0} rows but the image has {1}")]
    PlanMismatch(usize, usize),

    /// The participant's rows could not be resolved.
    #[error(transparent)]
    Partition(#[from] PartitionError),

    /// The output image could not be built.
    #[error(transparent)]
    Image(#[from] ImageError),
}

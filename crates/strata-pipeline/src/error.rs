use strata_comm::CommError;
use strata_image::ImageError;
use strata_imgproc::{morphology::MorphologyError, partition::PartitionError};
use strata_io::IoError;

/// An error type for the pipeline.
///
/// Errors are local to the participant that raises them. A participant that returns early while
/// the others carry on leaves them blocked at the next collective.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The image is not valid for an operation, e.g. too few channels to convert.
    #[error("Validation failed. {0}")]
    Validation(#[from] ImageError),

    /// The dilation could not run.
    #[error(transparent)]
    Morphology(#[from] MorphologyError),

    /// The rows could not be partitioned.
    #[error(transparent)]
    Partition(#[from] PartitionError),

    /// A collective operation failed.
    #[error("Collective operation failed. {0}")]
    Comm(#[from] CommError),

    /// The result could not be written.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The coordinator was not given an image.
    #[error("The coordinator (rank {0}) has no source image")]
    MissingSource(usize),

    /// The broadcast metadata disagrees with this participant's channel count.
    #[error("Metadata describes {got} channels, this participant expects {expected}")]
    MetadataMismatch {
        /// Channels this participant was built for.
        expected: usize,
        /// Channels in the broadcast metadata.
        got: usize,
    },
}

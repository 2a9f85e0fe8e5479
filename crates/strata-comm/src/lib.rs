#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// The collective operations every participant calls in lockstep.
pub mod communicator;

/// Error types for collective operations.
pub mod error;

/// An in-process group with one thread per participant.
pub mod local;

pub use crate::communicator::Communicator;
pub use crate::error::CommError;
pub use crate::local::{LocalCommunicator, LocalGroup};

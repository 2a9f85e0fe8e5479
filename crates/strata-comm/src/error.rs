/// An error type for collective operations.
///
/// Argument errors are reported to the participant that made the bad call; the collective still
/// completes its synchronization so the rest of the group is not left waiting.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommError {
    /// The group has no participants.
    #[error("group size must be > 0")]
    EmptyGroup,

    /// The root rank is not part of the group.
    #[error("root {0} is out of range for a group of {1}")]
    InvalidRoot(usize, usize),

    /// A buffer that must be present on the root was not provided.
    #[error("rank {0} must provide a {1} buffer as root")]
    MissingBuffer(usize, &'static str),

    /// A root buffer cannot hold one chunk per participant.
    #[error("buffer of {got} elements cannot hold {needed} elements")]
    BufferTooSmall {
        /// Elements required.
        needed: usize,
        /// Elements available.
        got: usize,
    },

    /// Participants disagree on the number of elements moved.
    #[error("expected {expected} elements, received {got}")]
    LengthMismatch {
        /// Elements this participant expected.
        expected: usize,
        /// Elements actually received.
        got: usize,
    },

    /// Participants disagree on the element type moved.
    #[error("element type sent by rank {0} does not match")]
    TypeMismatch(usize),

    /// A participant that should have contributed data did not.
    #[error("no data was contributed by rank {0}")]
    MissingContribution(usize),

    /// A participant failed while holding the group's shared state.
    #[error("a participant of the group failed; the group cannot continue")]
    GroupFault,
}

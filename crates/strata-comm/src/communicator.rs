use crate::error::CommError;

/// Group communication shared by a fixed set of participants.
///
/// Every method is a blocking collective: all participants of the group must call the same
/// operation, in the same order, with the same `root`, and none returns before the whole group
/// has entered the call. A participant that never arrives stalls the others indefinitely; there
/// is no timeout.
///
/// Data is always copied between participants, buffers are never shared.
pub trait Communicator {
    /// Zero-based identity of this participant.
    fn rank(&self) -> usize;

    /// Number of participants in the group.
    fn size(&self) -> usize;

    /// Whether this participant is `root`.
    fn is_root(&self, root: usize) -> bool {
        self.rank() == root
    }

    /// Block until every participant has entered the barrier.
    fn barrier(&self) -> Result<(), CommError>;

    /// Copy the root's `buf` into `buf` on every other participant.
    ///
    /// All participants must pass buffers of the same length.
    fn broadcast<T>(&self, buf: &mut [T], root: usize) -> Result<(), CommError>
    where
        T: Clone + Send + 'static;

    /// Split the root's `send` buffer into equal chunks of `recv.len()` elements and deliver
    /// chunk `r` to rank `r`.
    ///
    /// `send` is only read on the root and must hold at least `recv.len() * size()` elements;
    /// trailing elements are not sent.
    fn scatter<T>(&self, send: Option<&[T]>, recv: &mut [T], root: usize) -> Result<(), CommError>
    where
        T: Clone + Send + 'static;

    /// Collect `send` from every participant into the root's `recv`, in rank order.
    ///
    /// `recv` is only written on the root and must hold at least `send.len() * size()`
    /// elements; trailing elements are left untouched.
    fn gather<T>(&self, send: &[T], recv: Option<&mut [T]>, root: usize) -> Result<(), CommError>
    where
        T: Clone + Send + 'static;
}

use std::any::Any;
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use crate::communicator::Communicator;
use crate::error::CommError;

/// Data in flight to one participant.
type Slot = Option<Box<dyn Any + Send>>;

struct Shared {
    barrier: Barrier,
    // slot `r` only ever holds data addressed to rank `r` (or, for gather, sent by it)
    slots: Mutex<Vec<Slot>>,
}

/// A fixed-size group of participants living in one process.
///
/// Each participant is driven by its own thread through a [`LocalCommunicator`].
///
/// # Examples
///
/// ```
/// use strata_comm::{Communicator, LocalGroup};
///
/// let group = LocalGroup::new(3).unwrap();
/// let values = group.run(|comm| {
///     let mut value = [comm.rank() * 10];
///     comm.broadcast(&mut value, 2).unwrap();
///     value[0]
/// });
///
/// assert_eq!(values, vec![20, 20, 20]);
/// ```
pub struct LocalGroup {
    size: usize,
    shared: Arc<Shared>,
}

impl LocalGroup {
    /// Create a group of `size` participants.
    pub fn new(size: usize) -> Result<Self, CommError> {
        if size == 0 {
            return Err(CommError::EmptyGroup);
        }
        Ok(Self {
            size,
            shared: Arc::new(Shared {
                barrier: Barrier::new(size),
                slots: Mutex::new((0..size).map(|_| None).collect()),
            }),
        })
    }

    /// Number of participants.
    pub fn size(&self) -> usize {
        self.size
    }

    /// One communicator per rank, in rank order.
    ///
    /// Each must be driven from a different thread.
    pub fn communicators(&self) -> Vec<LocalCommunicator> {
        (0..self.size)
            .map(|rank| LocalCommunicator {
                rank,
                size: self.size,
                shared: Arc::clone(&self.shared),
            })
            .collect()
    }

    /// Run `f` once per participant, each on its own thread, and return the results in rank
    /// order.
    ///
    /// Returns once every participant has finished. If a participant panics, the panic is
    /// resumed on the caller after the others have returned; a participant that stops calling
    /// collectives leaves the others blocked.
    pub fn run<R, F>(&self, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(&LocalCommunicator) -> R + Sync,
    {
        let comms = self.communicators();
        let f = &f;

        thread::scope(|s| {
            let handles: Vec<_> = comms.iter().map(|comm| s.spawn(move || f(comm))).collect();

            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(r) => r,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}

/// The [`Communicator`] of one participant of a [`LocalGroup`].
pub struct LocalCommunicator {
    rank: usize,
    size: usize,
    shared: Arc<Shared>,
}

impl LocalCommunicator {
    fn with_slots<R>(
        &self,
        f: impl FnOnce(&mut [Slot]) -> Result<R, CommError>,
    ) -> Result<R, CommError> {
        match self.shared.slots.lock() {
            Ok(mut slots) => f(&mut slots),
            Err(_) => Err(CommError::GroupFault),
        }
    }

    fn sync(&self) {
        self.shared.barrier.wait();
    }

    fn check_root(&self, root: usize) -> Result<(), CommError> {
        if root >= self.size {
            return Err(CommError::InvalidRoot(root, self.size));
        }
        Ok(())
    }

    /// Run the two synchronization points of a collective without moving data.
    fn sync_only(&self, err: CommError) -> Result<(), CommError> {
        self.sync();
        self.sync();
        Err(err)
    }
}

fn take_vec<T: 'static>(slot: &mut Slot, from: usize) -> Result<Vec<T>, CommError> {
    let boxed = slot.take().ok_or(CommError::MissingContribution(from))?;
    boxed
        .downcast::<Vec<T>>()
        .map(|v| *v)
        .map_err(|_| CommError::TypeMismatch(from))
}

fn check_len(expected: usize, got: usize) -> Result<(), CommError> {
    if expected != got {
        return Err(CommError::LengthMismatch { expected, got });
    }
    Ok(())
}

// Every collective is: post under the lock, sync, collect under the lock, sync. Data is posted
// only into the slots of its receivers and every receiver empties its slot while collecting,
// so the second sync guarantees all slots are empty before the next collective posts.
impl Communicator for LocalCommunicator {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) -> Result<(), CommError> {
        log::trace!("rank {}: barrier", self.rank);
        self.sync();
        Ok(())
    }

    fn broadcast<T>(&self, buf: &mut [T], root: usize) -> Result<(), CommError>
    where
        T: Clone + Send + 'static,
    {
        if let Err(e) = self.check_root(root) {
            return self.sync_only(e);
        }
        log::debug!(
            "rank {}: broadcast of {} elements from root {root}",
            self.rank,
            buf.len()
        );

        let is_root = self.is_root(root);
        let posted = self.with_slots(|slots| {
            if is_root {
                for (r, slot) in slots.iter_mut().enumerate() {
                    if r != root {
                        *slot = Some(Box::new(buf.to_vec()));
                    }
                }
            }
            Ok(())
        });
        self.sync();

        let collected = self.with_slots(|slots| {
            if is_root {
                return Ok(());
            }
            let data = take_vec::<T>(&mut slots[self.rank], root)?;
            check_len(buf.len(), data.len())?;
            buf.clone_from_slice(&data);
            Ok(())
        });
        self.sync();

        posted.and(collected)
    }

    fn scatter<T>(&self, send: Option<&[T]>, recv: &mut [T], root: usize) -> Result<(), CommError>
    where
        T: Clone + Send + 'static,
    {
        if let Err(e) = self.check_root(root) {
            return self.sync_only(e);
        }
        log::debug!(
            "rank {}: scatter of {} elements per rank from root {root}",
            self.rank,
            recv.len()
        );

        let is_root = self.is_root(root);
        let count = recv.len();
        let posted = self.with_slots(|slots| {
            if !is_root {
                return Ok(());
            }
            let send = send.ok_or(CommError::MissingBuffer(self.rank, "send"))?;
            let needed = count * self.size;
            if send.len() < needed {
                return Err(CommError::BufferTooSmall {
                    needed,
                    got: send.len(),
                });
            }
            for (r, slot) in slots.iter_mut().enumerate() {
                let chunk = &send[r * count..(r + 1) * count];
                if r == root {
                    recv.clone_from_slice(chunk);
                } else {
                    *slot = Some(Box::new(chunk.to_vec()));
                }
            }
            Ok(())
        });
        self.sync();

        let collected = self.with_slots(|slots| {
            if is_root {
                return Ok(());
            }
            let data = take_vec::<T>(&mut slots[self.rank], root)?;
            check_len(recv.len(), data.len())?;
            recv.clone_from_slice(&data);
            Ok(())
        });
        self.sync();

        posted.and(collected)
    }

    fn gather<T>(&self, send: &[T], recv: Option<&mut [T]>, root: usize) -> Result<(), CommError>
    where
        T: Clone + Send + 'static,
    {
        if let Err(e) = self.check_root(root) {
            return self.sync_only(e);
        }
        log::debug!(
            "rank {}: gather of {} elements per rank to root {root}",
            self.rank,
            send.len()
        );

        let is_root = self.is_root(root);
        let count = send.len();
        let posted = self.with_slots(|slots| {
            if !is_root {
                slots[self.rank] = Some(Box::new(send.to_vec()));
            }
            Ok(())
        });
        self.sync();

        let collected = self.with_slots(|slots| {
            if !is_root {
                return Ok(());
            }

            // drain every contribution first so no slot outlives this collective
            let mut chunks = Vec::with_capacity(self.size);
            for (r, slot) in slots.iter_mut().enumerate() {
                if r != root {
                    chunks.push((r, take_vec::<T>(slot, r)));
                }
            }

            let recv = recv.ok_or(CommError::MissingBuffer(self.rank, "receive"))?;
            let needed = count * self.size;
            if recv.len() < needed {
                return Err(CommError::BufferTooSmall {
                    needed,
                    got: recv.len(),
                });
            }

            recv[root * count..(root + 1) * count].clone_from_slice(send);
            for (r, chunk) in chunks {
                let chunk = chunk?;
                check_len(count, chunk.len())?;
                recv[r * count..(r + 1) * count].clone_from_slice(&chunk);
            }
            Ok(())
        });
        self.sync();

        posted.and(collected)
    }
}

use crate::error::{Result, ThreadError};
use std::fmt;
use std::thread::{self, JoinHandle, ThreadId};

/// Exclusive owner of at most one OS thread that joins it on drop
///
/// A `JoiningThread` is either *joinable* (it owns a thread that has not been
/// joined or detached yet) or *empty*. It cannot be cloned: the only way the
/// owned thread changes hands is a move, or [`JoiningThread::take`], which
/// leaves the source empty.
///
/// Dropping or overwriting a joinable handle blocks until the owned thread
/// finishes. There is no timeout: a thread that never returns blocks its
/// owner forever.
///
/// # Example
/// ```rust
/// use threadkeep::thread::JoiningThread;
///
/// let mut worker = JoiningThread::spawn(|| 6 * 7).unwrap();
/// assert!(worker.joinable());
/// assert_eq!(worker.join().unwrap(), 42);
/// assert!(!worker.joinable());
/// ```
pub struct JoiningThread<T = ()> {
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> JoiningThread<T> {
    /// Start `f` on a new thread owned by the returned handle
    ///
    /// Everything `f` captures is moved into the thread. The `'static` bound
    /// rejects at compile time any closure that borrows data which could be
    /// dropped while the thread is still running; to share data, move an
    /// `Arc` in, or use [`crate::parallel::ParallelReduce::reduce_slice`]
    /// for scoped borrowing.
    pub fn spawn<F>(f: F) -> Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let handle = thread::Builder::new().spawn(f)?;
        tracing::trace!("Spawned thread {:?}", handle.thread().id());
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Start `f` on a new thread carrying an OS-visible name
    pub fn spawn_named<F>(name: impl Into<String>, f: F) -> Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let handle = thread::Builder::new().name(name.into()).spawn(f)?;
        tracing::trace!(
            "Spawned thread {:?} ({})",
            handle.thread().id(),
            handle.thread().name().unwrap_or("unnamed")
        );
        Ok(Self {
            handle: Some(handle),
        })
    }
}

impl<T> JoiningThread<T> {
    /// Create a handle that owns nothing
    pub fn empty() -> Self {
        Self { handle: None }
    }

    /// True iff the handle owns a thread that has not been joined or detached
    pub fn joinable(&self) -> bool {
        self.handle.is_some()
    }

    /// Identity of the owned thread, `None` when empty
    pub fn id(&self) -> Option<ThreadId> {
        self.handle.as_ref().map(|handle| handle.thread().id())
    }

    /// Block until the owned thread finishes and return its result
    ///
    /// The handle is empty afterwards, whether the thread returned normally
    /// or panicked. Joining an empty handle is a programming error and fails
    /// with [`ThreadError::InvalidState`].
    pub fn join(&mut self) -> Result<T> {
        let handle = self
            .handle
            .take()
            .ok_or(ThreadError::InvalidState("no thread to join"))?;
        tracing::trace!("Joining thread {:?}", handle.thread().id());
        handle.join().map_err(ThreadError::from_panic)
    }

    /// Release ownership without waiting
    ///
    /// The thread keeps running on its own and is no longer tracked.
    pub fn detach(&mut self) -> Result<()> {
        let handle = self
            .handle
            .take()
            .ok_or(ThreadError::InvalidState("no thread to detach"))?;
        tracing::trace!("Detaching thread {:?}", handle.thread().id());
        // Dropping a std JoinHandle detaches the thread.
        drop(handle);
        Ok(())
    }

    /// Move the owned thread out into a new handle, leaving `self` empty
    pub fn take(&mut self) -> Self {
        Self {
            handle: self.handle.take(),
        }
    }

    /// Replace the owned thread with `other`'s, joining the current one first
    ///
    /// Ownership is transferred even when the previous thread panicked; the
    /// panic is reported through the returned error. Plain assignment
    /// (`a = b`) gives the same join-before-replace guarantee through `Drop`,
    /// but resumes a panic instead of returning it.
    pub fn assign(&mut self, mut other: Self) -> Result<()> {
        let previous = match self.handle.take() {
            Some(handle) => {
                tracing::trace!(
                    "Joining thread {:?} before reassignment",
                    handle.thread().id()
                );
                handle.join().map(drop).map_err(ThreadError::from_panic)
            }
            None => Ok(()),
        };
        self.handle = other.handle.take();
        previous
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.handle, &mut other.handle);
    }

    /// Borrow the underlying std handle
    pub fn as_handle(&self) -> Option<&JoinHandle<T>> {
        self.handle.as_ref()
    }

    /// Give up the join-on-drop guarantee and return the std handle
    pub fn into_inner(mut self) -> Option<JoinHandle<T>> {
        self.handle.take()
    }
}

impl<T> Default for JoiningThread<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<JoinHandle<T>> for JoiningThread<T> {
    fn from(handle: JoinHandle<T>) -> Self {
        Self {
            handle: Some(handle),
        }
    }
}

impl<T> fmt::Debug for JoiningThread<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoiningThread")
            .field("id", &self.id())
            .field("joinable", &self.joinable())
            .finish()
    }
}

impl<T> Drop for JoiningThread<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            join_on_drop(handle);
        }
    }
}

/// Join a handle from a destructor
///
/// A panic from the joined thread is resumed on the owner, unless the owner
/// is already unwinding, where a second panic would abort the process.
pub(crate) fn join_on_drop<T>(handle: JoinHandle<T>) {
    let id = handle.thread().id();
    tracing::trace!("Joining thread {:?} on drop", id);
    if let Err(payload) = handle.join() {
        if thread::panicking() {
            tracing::error!("Thread {:?} panicked while its owner was unwinding", id);
        } else {
            std::panic::resume_unwind(payload);
        }
    }
}

use super::joining::{JoiningThread, join_on_drop};
use crate::error::{Result, ThreadError};
use std::fmt;
use std::thread::{JoinHandle, ThreadId};

/// Strict thread owner that always holds a joinable thread until it is dropped
///
/// Unlike [`JoiningThread`] there is no empty state, no detach and no way to
/// hand the thread back out: construction fails on an empty handle, and the
/// thread is joined either by [`ScopedThread::join`] or on drop.
pub struct ScopedThread<T = ()> {
    id: ThreadId,
    handle: Option<JoinHandle<T>>,
}

impl<T> ScopedThread<T> {
    /// Take ownership of the thread held by `thread`
    ///
    /// Fails with [`ThreadError::InvalidState`] if `thread` is empty.
    pub fn new(thread: JoiningThread<T>) -> Result<Self> {
        let handle = thread
            .into_inner()
            .ok_or(ThreadError::InvalidState("no thread"))?;
        Ok(Self::from(handle))
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }

    /// Wait for the thread and return its result
    pub fn join(mut self) -> Result<T> {
        let handle = self
            .handle
            .take()
            .ok_or(ThreadError::InvalidState("no thread"))?;
        handle.join().map_err(ThreadError::from_panic)
    }
}

impl<T: Send + 'static> ScopedThread<T> {
    pub fn spawn<F>(f: F) -> Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::new(JoiningThread::spawn(f)?)
    }
}

impl<T> From<JoinHandle<T>> for ScopedThread<T> {
    fn from(handle: JoinHandle<T>) -> Self {
        Self {
            id: handle.thread().id(),
            handle: Some(handle),
        }
    }
}

impl<T> fmt::Debug for ScopedThread<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedThread").field("id", &self.id).finish()
    }
}

impl<T> Drop for ScopedThread<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            join_on_drop(handle);
        }
    }
}

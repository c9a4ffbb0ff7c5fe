use std::thread::{self, ThreadId};

/// Identity of the thread that captured it
///
/// Captured once (typically at startup) and passed to code that needs to
/// branch on whether it runs on that thread. It is a plain value, not global
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MasterThread {
    id: ThreadId,
}

impl MasterThread {
    /// Record the calling thread as the master
    pub fn capture() -> Self {
        Self {
            id: thread::current().id(),
        }
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }

    /// True when called from the captured thread
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.id
    }
}

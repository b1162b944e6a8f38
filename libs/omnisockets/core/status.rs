use std::sync::atomic::{AtomicU8, Ordering};

/// Connection status of a single transport instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// Created, or dropped with a reconnect still possible
    Init = 0,
    /// Logical connection is open
    Open = 1,
    /// Terminal close, no reconnect will follow
    Close = 2,
    /// An upgrade or channel failure was observed
    Error = 3,
}

impl Status {
    fn from_u8(value: u8) -> Status {
        match value {
            0 => Status::Init,
            1 => Status::Open,
            2 => Status::Close,
            _ => Status::Error,
        }
    }
}

/// Lock-free status cell
///
/// Network callbacks and application threads read and write the status
/// concurrently; all access goes through atomics so no lock is ever held
/// across a dispatch.
pub struct AtomicStatus {
    inner: AtomicU8,
}

impl AtomicStatus {
    pub fn new(status: Status) -> Self {
        Self {
            inner: AtomicU8::new(status as u8),
        }
    }

    #[inline]
    pub fn get(&self) -> Status {
        Status::from_u8(self.inner.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set(&self, status: Status) {
        self.inner.store(status as u8, Ordering::Release);
    }

    /// Transition from `current` to `new` only if nobody raced us
    ///
    /// Returns the witnessed status on failure.
    pub fn compare_exchange(&self, current: Status, new: Status) -> Result<Status, Status> {
        self.inner
            .compare_exchange(
                current as u8,
                new as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(Status::from_u8)
            .map_err(Status::from_u8)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.get() == Status::Open
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.get() == Status::Close
    }
}

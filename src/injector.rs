use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Why a single frame could not be handed to the interface.
#[derive(thiserror::Error, Debug)]
pub enum InjectError {
    #[error("Interface is gone: {0}")]
    InterfaceGone(io::Error),
    #[error("Error writing frame: {0}")]
    Io(io::Error),
    #[error("Short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
    #[error("Frame rejected: {0}")]
    Rejected(String),
}

impl InjectError {
    /// Sort an OS error into fatal (interface vanished) or recoverable.
    pub fn from_io(error: io::Error) -> Self {
        match error.raw_os_error() {
            Some(libc::ENODEV) | Some(libc::ENXIO) | Some(libc::ENETDOWN) => {
                InjectError::InterfaceGone(error)
            }
            _ => InjectError::Io(error),
        }
    }

    /// Fatal errors end the session, everything else is counted and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, InjectError::InterfaceGone(_))
    }
}

impl From<io::Error> for InjectError {
    fn from(error: io::Error) -> Self {
        InjectError::from_io(error)
    }
}

/// The only I/O boundary of a session: takes fully encoded frames
/// (radiotap preamble included) and puts them on the air.
///
/// Implementations release their resources on drop.
pub trait FrameInjector {
    fn inject(&mut self, frame: &[u8]) -> Result<(), InjectError>;
}

impl<T: FrameInjector + ?Sized> FrameInjector for Box<T> {
    fn inject(&mut self, frame: &[u8]) -> Result<(), InjectError> {
        (**self).inject(frame)
    }
}

/// How a [RecordingInjector] answers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    Fail,
    /// Every n-th call fails (1-based), the rest succeed.
    FailEvery(u64),
    /// Call n and every call after it report a vanished interface.
    FailFatalAt(u64),
}

#[derive(Debug, Default)]
struct Shared {
    frames: Mutex<Vec<Vec<u8>>>,
    released: AtomicBool,
}

fn lock(frames: &Mutex<Vec<Vec<u8>>>) -> MutexGuard<'_, Vec<Vec<u8>>> {
    frames.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory injector. Keeps every frame it was asked to send, whether the
/// scripted answer was a success or not.
#[derive(Debug)]
pub struct RecordingInjector {
    behavior: Behavior,
    shared: Arc<Shared>,
}

/// Read access to a [RecordingInjector] after it moved into a session.
#[derive(Clone, Debug)]
pub struct RecordingHandle {
    shared: Arc<Shared>,
}

impl RecordingInjector {
    pub fn new(behavior: Behavior) -> Self {
        RecordingInjector {
            behavior,
            shared: Arc::new(Shared::default()),
        }
    }

    pub fn handle(&self) -> RecordingHandle {
        RecordingHandle {
            shared: self.shared.clone(),
        }
    }
}

impl FrameInjector for RecordingInjector {
    fn inject(&mut self, frame: &[u8]) -> Result<(), InjectError> {
        let call = {
            let mut frames = lock(&self.shared.frames);
            frames.push(frame.to_vec());
            frames.len() as u64
        };

        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(InjectError::Rejected("scripted failure".to_string())),
            Behavior::FailEvery(n) if n > 0 && call % n == 0 => {
                Err(InjectError::Rejected(format!("scripted failure on call {call}")))
            }
            Behavior::FailEvery(_) => Ok(()),
            Behavior::FailFatalAt(n) if call >= n => Err(InjectError::from_io(
                io::Error::from_raw_os_error(libc::ENODEV),
            )),
            Behavior::FailFatalAt(_) => Ok(()),
        }
    }
}

impl Drop for RecordingInjector {
    fn drop(&mut self) {
        self.shared.released.store(true, Ordering::SeqCst);
    }
}

impl RecordingHandle {
    /// Every frame passed to `inject`, in call order.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        lock(&self.shared.frames).clone()
    }

    pub fn calls(&self) -> usize {
        lock(&self.shared.frames).len()
    }

    /// Whether the injector has been dropped.
    pub fn is_released(&self) -> bool {
        self.shared.released.load(Ordering::SeqCst)
    }
}

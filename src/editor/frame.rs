use std::time::Duration;
use tokio::time::Instant;

/// Work deferred to the next frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameWork {
    pub highlight: bool,
    pub resize: bool,
}

/// Coalesces highlight and resize requests into one pass per frame.
///
/// The first request after a flush arms a deadline one frame away; further
/// requests before that deadline only set flags.
#[derive(Debug)]
pub struct FrameRequests {
    interval: Duration,
    pending: FrameWork,
    deadline: Option<Instant>,
}

impl FrameRequests {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: FrameWork::default(),
            deadline: None,
        }
    }

    pub fn request_highlight(&mut self) {
        self.pending.highlight = true;
        self.arm();
    }

    pub fn request_resize(&mut self) {
        self.pending.resize = true;
        self.arm();
    }

    fn arm(&mut self) {
        if self.deadline.is_none() {
            self.deadline = Some(Instant::now() + self.interval);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Takes everything requested since the last frame
    pub fn take(&mut self) -> FrameWork {
        self.deadline = None;
        std::mem::take(&mut self.pending)
    }
}

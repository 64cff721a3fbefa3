// Editor module - local edit events and next-frame work
mod emitter;
mod frame;

pub use emitter::{InputEmitter, PendingContent};
pub use frame::{FrameRequests, FrameWork};

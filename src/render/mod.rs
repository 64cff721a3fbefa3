// Render module - deferred formula typesetting
mod scheduler;

pub use scheduler::{RenderDebt, RenderScheduler, RenderTick};

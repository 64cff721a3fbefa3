// Module declarations
mod autosave;
mod builder;
mod handle;
mod options;
mod session;
mod state;

// Public API exports
pub use autosave::{Autosave, DocumentSaver};
pub use builder::PreviewSessionBuilder;
pub use handle::SessionHandle;
pub use options::SessionOptions;
pub use session::PreviewSession;

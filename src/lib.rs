//! # Live Preview
//!
//! Client side of a live-preview Markdown editor. Local edits are streamed to
//! a preview server over WebSocket, rendered HTML comes back and replaces the
//! preview, and an expensive math typesetting pass is deferred until typing
//! pauses.
//!
//! ## Example
//!
//! ```no_run
//! use live_preview::{PreviewSession, PreviewView, SessionOptions};
//!
//! struct Terminal;
//!
//! impl PreviewView for Terminal {
//!     fn replace_preview(&mut self, html: &str) { println!("{html}"); }
//!     fn refresh_highlight(&mut self, _text: &str) {}
//!     fn resize_editor(&mut self) {}
//!     fn typeset(&mut self) {}
//!     fn load_editor(&mut self, _text: &str) {}
//!     fn show_error(&mut self, message: &str) { eprintln!("{message}"); }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = PreviewSession::new(
//!         "http://localhost:3000/",
//!         SessionOptions::from_env()?,
//!         Terminal,
//!     )?;
//!     let handle = session.start();
//!
//!     handle.edit("# Hello $x^2$")?;
//!     handle.teardown().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod editor;
pub mod infrastructure;
pub mod render;
pub mod session;
pub mod transport;
pub mod types;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, DocumentId, DocumentSummary, Theme};
pub use session::{
    DocumentSaver, PreviewSession, PreviewSessionBuilder, SessionHandle, SessionOptions,
};
pub use transport::{ChannelState, Connector, WebSocketConnector};
pub use types::{PreviewError, Result};
pub use view::PreviewView;

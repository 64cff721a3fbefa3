use super::autosave::DocumentSaver;
use super::builder::PreviewSessionBuilder;
use super::handle::SessionHandle;
use super::options::SessionOptions;
use super::state::SessionState;
use crate::editor::InputEmitter;
use crate::infrastructure::ReconnectPolicy;
use crate::render::RenderScheduler;
use crate::transport::{ChannelState, Connector, TransportChannel};
use crate::types::Result;
use crate::view::PreviewView;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use url::Url;

/// A live-preview editing session.
///
/// One session spans every physical connection made while the editing view
/// is alive. It wires local edits to the preview socket, rendered HTML back
/// into the view, and drives the deferred typesetting pass.
///
/// # Example
///
/// ```no_run
/// use live_preview::{PreviewSession, PreviewView, SessionOptions};
///
/// struct Page;
///
/// impl PreviewView for Page {
///     fn replace_preview(&mut self, html: &str) { println!("{html}"); }
///     fn refresh_highlight(&mut self, _text: &str) {}
///     fn resize_editor(&mut self) {}
///     fn typeset(&mut self) {}
///     fn load_editor(&mut self, _text: &str) {}
///     fn show_error(&mut self, message: &str) { eprintln!("{message}"); }
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let session = PreviewSession::new("http://localhost:3000/", SessionOptions::default(), Page)?;
/// let handle = session.start();
///
/// handle.edit("# Hello")?;
/// handle.edit("# Hello, world")?;
///
/// handle.teardown().await;
/// # Ok(())
/// # }
/// ```
pub struct PreviewSession<V: PreviewView> {
    pub(crate) endpoint: Url,
    pub(crate) options: SessionOptions,
    pub(crate) view: V,
    pub(crate) connector: Arc<dyn Connector>,
    pub(crate) saver: Option<Arc<dyn DocumentSaver>>,
}

impl<V: PreviewView> PreviewSession<V> {
    /// Creates a session using the WebSocket connector and no autosave.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Config`](crate::PreviewError::Config) for invalid
    /// options or a page URL that is not http/https, and
    /// [`PreviewError::UrlParse`](crate::PreviewError::UrlParse) for a malformed one.
    pub fn new(page_url: &str, options: SessionOptions, view: V) -> Result<Self> {
        PreviewSessionBuilder::new(page_url, options, view).map(|builder| builder.build())
    }

    pub fn builder(
        page_url: &str,
        options: SessionOptions,
        view: V,
    ) -> Result<PreviewSessionBuilder<V>> {
        PreviewSessionBuilder::new(page_url, options, view)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Connects and starts the render scheduler. Must be called from within
    /// a Tokio runtime.
    pub fn start(self) -> SessionHandle {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ChannelState::Closed);

        let channel = TransportChannel::new(
            self.endpoint,
            self.connector,
            ReconnectPolicy::new(
                self.options.max_reconnect_attempts,
                self.options.reconnect_delay(),
            ),
            events_tx,
            state_tx,
        );

        let state = SessionState {
            channel,
            emitter: InputEmitter::new(
                self.options.initial_content.clone(),
                self.options.frame_interval(),
            ),
            scheduler: RenderScheduler::new(
                self.options.render_interval(),
                self.options.initial_render_debt,
            ),
            view: self.view,
            saver: self.saver,
            autosave_interval: self.options.autosave_interval(),
        };

        let driver = tokio::spawn(state.run(commands_rx, events_rx));

        SessionHandle::new(commands_tx, state_rx, driver)
    }
}

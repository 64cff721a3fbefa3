use super::state::Command;
use crate::api::DocumentId;
use crate::transport::ChannelState;
use crate::types::{PreviewError, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;

/// Cloneable handle to a running [`PreviewSession`](super::PreviewSession).
///
/// Every call is forwarded to the session's event loop, so handles can be
/// used from any task without coordinating with each other.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<ChannelState>,
    driver: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SessionHandle {
    pub(crate) fn new(
        commands: mpsc::UnboundedSender<Command>,
        state: watch::Receiver<ChannelState>,
        driver: JoinHandle<()>,
    ) -> Self {
        Self {
            commands,
            state,
            driver: Arc::new(Mutex::new(Some(driver))),
        }
    }

    fn command(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| PreviewError::TornDown)
    }

    /// Reports a local edit carrying the full current editor text.
    ///
    /// Never fails because of the connection: while disconnected the text is
    /// kept as the latest content and sent on the next successful open.
    /// Fails only with [`PreviewError::TornDown`] once the session is gone.
    pub fn edit(&self, text: impl Into<String>) -> Result<()> {
        self.command(Command::Edit(text.into()))
    }

    /// Loads a stored document into the editor and autosaves it periodically
    pub fn open_document(&self, id: DocumentId, content: impl Into<String>) -> Result<()> {
        self.command(Command::OpenDocument {
            id,
            content: content.into(),
        })
    }

    /// Stops autosaving the current document
    pub fn close_document(&self) -> Result<()> {
        self.command(Command::CloseDocument)
    }

    /// Current connection state
    pub fn state(&self) -> ChannelState {
        *self.state.borrow()
    }

    /// Receiver notified on every connection state change
    pub fn state_changes(&self) -> watch::Receiver<ChannelState> {
        self.state.clone()
    }

    /// Waits until the connection reaches `target`. Returns `false` if the
    /// session ended first.
    pub async fn wait_for(&self, target: ChannelState) -> bool {
        let mut state = self.state.clone();
        let reached = state.wait_for(|current| *current == target).await.is_ok();
        reached
    }

    /// Stops the session: the render timer, any pending reconnection and the
    /// live connection are all released before this returns. Idempotent.
    pub async fn teardown(&self) {
        let _ = self.commands.send(Command::Teardown);

        let driver = self.driver.lock().await.take();
        if let Some(driver) = driver
            && let Err(e) = driver.await
        {
            tracing::warn!("Session task ended abnormally: {}", e);
        }
    }
}

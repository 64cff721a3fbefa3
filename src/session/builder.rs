use super::autosave::DocumentSaver;
use super::options::SessionOptions;
use super::session::PreviewSession;
use crate::infrastructure::socket_endpoint;
use crate::transport::{Connector, WebSocketConnector};
use crate::types::Result;
use crate::view::PreviewView;
use std::sync::Arc;
use url::Url;

/// Builder for [`PreviewSession`] that validates configuration up front
pub struct PreviewSessionBuilder<V: PreviewView> {
    endpoint: Url,
    options: SessionOptions,
    view: V,
    connector: Arc<dyn Connector>,
    saver: Option<Arc<dyn DocumentSaver>>,
}

impl<V: PreviewView> PreviewSessionBuilder<V> {
    /// Create a new builder.
    ///
    /// `page_url` is the address of the editor page; the preview socket
    /// endpoint is derived from it.
    pub fn new(page_url: &str, options: SessionOptions, view: V) -> Result<Self> {
        options.validate()?;
        let endpoint = socket_endpoint(page_url)?;

        Ok(Self {
            endpoint,
            options,
            view,
            connector: Arc::new(WebSocketConnector),
            saver: None,
        })
    }

    /// Replaces the WebSocket connector, e.g. with an in-memory transport
    pub fn with_connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = connector;
        self
    }

    /// Enables autosave of opened documents through `saver`
    pub fn with_saver(mut self, saver: Arc<dyn DocumentSaver>) -> Self {
        self.saver = Some(saver);
        self
    }

    pub fn build(self) -> PreviewSession<V> {
        PreviewSession {
            endpoint: self.endpoint,
            options: self.options,
            view: self.view,
            connector: self.connector,
            saver: self.saver,
        }
    }
}

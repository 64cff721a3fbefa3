use crate::types::{PreviewError, Result};
use futures::future::{self, BoxFuture};
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::pin::Pin;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

/// Outbound half of a connection: accepts full editor texts.
pub type FrameSink = Pin<Box<dyn Sink<String, Error = PreviewError> + Send>>;

/// Inbound half of a connection.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<InboundFrame>> + Send>>;

/// A frame received from the preview server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// Rendered HTML for the whole preview area
    Html(String),
    /// The server closed the connection
    Close,
}

/// One physical, single-use connection.
pub struct Connection {
    pub sink: FrameSink,
    pub stream: FrameStream,
}

/// Creates connection objects. A connection is never reused: every attempt,
/// including reconnections, goes through a fresh `connect` call.
pub trait Connector: Send + Sync + 'static {
    fn connect(&self, url: &Url) -> BoxFuture<'static, Result<Connection>>;
}

/// Connector backed by `tokio-tungstenite`
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

impl Connector for WebSocketConnector {
    fn connect(&self, url: &Url) -> BoxFuture<'static, Result<Connection>> {
        let url = url.to_string();

        Box::pin(async move {
            tracing::debug!("Creating WebSocket connection to: {}", url);
            let (ws_stream, _response) = tokio_tungstenite::connect_async(url.as_str()).await?;
            let (write_half, read_half) = ws_stream.split();

            let sink = write_half.with(|text: String| {
                future::ready(Ok::<_, PreviewError>(Message::Text(text.into())))
            });
            let stream = read_half.filter_map(|msg| future::ready(inbound_frame(msg)));

            Ok(Connection {
                sink: Box::pin(sink),
                stream: Box::pin(stream),
            })
        })
    }
}

fn inbound_frame(
    msg: std::result::Result<Message, tungstenite::Error>,
) -> Option<Result<InboundFrame>> {
    match msg {
        Ok(Message::Text(text)) => Some(Ok(InboundFrame::Html(text.as_str().to_owned()))),
        Ok(Message::Close(frame)) => {
            if let Some(close_frame) = frame {
                tracing::info!(
                    "Server closed connection: code={:?}, reason='{}'",
                    close_frame.code,
                    close_frame.reason
                );
            } else {
                tracing::info!("Server closed connection without close frame");
            }
            Some(Ok(InboundFrame::Close))
        }
        Ok(Message::Ping(data)) => {
            tracing::trace!("Received ping ({} bytes)", data.len());
            None
        }
        Ok(Message::Pong(data)) => {
            tracing::trace!("Received pong ({} bytes)", data.len());
            None
        }
        Ok(Message::Binary(data)) => {
            tracing::warn!(
                "Received unexpected binary message ({} bytes)",
                data.len()
            );
            None
        }
        Ok(Message::Frame(_)) => None,
        Err(e) => Some(Err(PreviewError::from(e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_frames_become_html() {
        let frame = inbound_frame(Ok(Message::Text("<h1>hi</h1>".into())));
        assert_eq!(frame.unwrap().unwrap(), InboundFrame::Html("<h1>hi</h1>".into()));
    }

    #[test]
    fn test_control_frames_are_skipped() {
        assert!(inbound_frame(Ok(Message::Ping(Vec::<u8>::new().into()))).is_none());
        assert!(inbound_frame(Ok(Message::Pong(Vec::<u8>::new().into()))).is_none());
        assert!(inbound_frame(Ok(Message::Binary(vec![1u8, 2, 3].into()))).is_none());
    }

    #[test]
    fn test_close_and_errors_are_forwarded() {
        let frame = inbound_frame(Ok(Message::Close(None)));
        assert_eq!(frame.unwrap().unwrap(), InboundFrame::Close);

        let frame = inbound_frame(Err(tungstenite::Error::ConnectionClosed));
        assert!(matches!(frame, Some(Err(PreviewError::WebSocket(_)))));
    }
}

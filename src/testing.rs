//! In-memory doubles for the connector, the view binding and the saver.

use crate::api::DocumentId;
use crate::session::DocumentSaver;
use crate::transport::{Connection, Connector, FrameSink, InboundFrame};
use crate::types::{PreviewError, Result};
use crate::view::PreviewView;
use futures::future::{self, BoxFuture};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::time::Instant;
use url::Url;

pub(crate) type ServerTx = mpsc::UnboundedSender<Result<InboundFrame>>;

/// How the write half of an accepted connection behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Writes {
    /// Every text is recorded in [`ScriptedConnector::sent`]
    Record,
    /// Every write fails
    Fail,
    /// Writes never complete, like a peer that stopped reading
    Stall,
}

/// What the next `connect` call does
pub(crate) enum Script {
    Refuse,
    Accept(mpsc::UnboundedReceiver<Result<InboundFrame>>, Writes),
}

impl Script {
    /// An accepted connection; the returned sender plays the server side.
    /// Dropping it ends the stream, like the server closing the socket.
    pub(crate) fn accept() -> (Self, ServerTx) {
        Self::accept_with(Writes::Record)
    }

    pub(crate) fn accept_with(writes: Writes) -> (Self, ServerTx) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::Accept(rx, writes), tx)
    }

    /// An accepted connection that errors right away, then ends
    pub(crate) fn accept_then_fail() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(Err(PreviewError::Connection("connection reset".into())));
        Self::Accept(rx, Writes::Record)
    }
}

#[derive(Default)]
struct ConnectorLog {
    script: VecDeque<Script>,
    attempts: Vec<Instant>,
    sent: Vec<String>,
}

/// Connector following a script; refuses once the script runs out.
#[derive(Clone, Default)]
pub(crate) struct ScriptedConnector {
    inner: Arc<Mutex<ConnectorLog>>,
}

impl ScriptedConnector {
    pub(crate) fn new(script: Vec<Script>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ConnectorLog {
                script: script.into(),
                ..Default::default()
            })),
        }
    }

    pub(crate) fn attempts(&self) -> Vec<Instant> {
        self.inner.lock().unwrap().attempts.clone()
    }

    pub(crate) fn sent(&self) -> Vec<String> {
        self.inner.lock().unwrap().sent.clone()
    }
}

impl Connector for ScriptedConnector {
    fn connect(&self, _url: &Url) -> BoxFuture<'static, Result<Connection>> {
        let next = {
            let mut log = self.inner.lock().unwrap();
            log.attempts.push(Instant::now());
            log.script.pop_front()
        };
        let inner = Arc::clone(&self.inner);

        Box::pin(async move {
            match next {
                Some(Script::Accept(rx, writes)) => {
                    let sink: FrameSink = match writes {
                        Writes::Record => Box::pin(futures::sink::unfold(
                            inner,
                            |inner, text: String| async move {
                                inner.lock().unwrap().sent.push(text);
                                Ok::<_, PreviewError>(inner)
                            },
                        )),
                        Writes::Fail => Box::pin(futures::sink::unfold((), |(), _: String| {
                            future::ready(Err::<(), _>(PreviewError::Connection(
                                "broken pipe".into(),
                            )))
                        })),
                        Writes::Stall => Box::pin(futures::sink::unfold((), |(), _: String| {
                            future::pending::<Result<()>>()
                        })),
                    };
                    let stream = futures::stream::unfold(rx, |mut rx| async move {
                        rx.recv().await.map(|frame| (frame, rx))
                    });
                    Ok(Connection {
                        sink,
                        stream: Box::pin(stream),
                    })
                }
                Some(Script::Refuse) | None => {
                    Err(PreviewError::Connection("connection refused".into()))
                }
            }
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct ViewLog {
    pub previews: Vec<String>,
    pub highlights: Vec<String>,
    pub resizes: usize,
    pub typesets: Vec<Instant>,
    pub loaded: Vec<String>,
    pub errors: Vec<String>,
}

/// View binding that records every call
#[derive(Clone, Default)]
pub(crate) struct RecordingView {
    log: Arc<Mutex<ViewLog>>,
}

impl RecordingView {
    pub(crate) fn with<R>(&self, f: impl FnOnce(&ViewLog) -> R) -> R {
        f(&self.log.lock().unwrap())
    }
}

impl PreviewView for RecordingView {
    fn replace_preview(&mut self, html: &str) {
        self.log.lock().unwrap().previews.push(html.to_owned());
    }

    fn refresh_highlight(&mut self, text: &str) {
        self.log.lock().unwrap().highlights.push(text.to_owned());
    }

    fn resize_editor(&mut self) {
        self.log.lock().unwrap().resizes += 1;
    }

    fn typeset(&mut self) {
        self.log.lock().unwrap().typesets.push(Instant::now());
    }

    fn load_editor(&mut self, text: &str) {
        self.log.lock().unwrap().loaded.push(text.to_owned());
    }

    fn show_error(&mut self, message: &str) {
        self.log.lock().unwrap().errors.push(message.to_owned());
    }
}

/// Saver recording `(document, text, when)`; fails when `failing` is set
#[derive(Clone, Default)]
pub(crate) struct RecordingSaver {
    pub saves: Arc<Mutex<Vec<(DocumentId, String, Instant)>>>,
    pub failing: bool,
}

impl DocumentSaver for RecordingSaver {
    fn save(&self, document_id: DocumentId, text: String) -> BoxFuture<'static, Result<()>> {
        let saves = Arc::clone(&self.saves);
        let failing = self.failing;

        Box::pin(async move {
            if failing {
                return Err(PreviewError::Api {
                    status: 401,
                    message: "Invalid user session".into(),
                });
            }
            saves
                .lock()
                .unwrap()
                .push((document_id, text, Instant::now()));
            Ok(())
        })
    }
}

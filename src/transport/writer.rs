use super::connector::FrameSink;
use super::state::{Generation, TransportEvent};
use crate::types::{CLOSE_TIMEOUT, OUTBOX_CAPACITY};
use futures::SinkExt;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct Queue {
    texts: VecDeque<String>,
    closed: bool,
}

/// Bounded queue of outgoing editor texts that never blocks the producer.
///
/// Texts are delivered in order. When the queue is full the newest queued
/// text is replaced: every text is the full editor content, so the latest one
/// supersedes it.
#[derive(Debug, Clone)]
pub(crate) struct Outbox {
    queue: Arc<Mutex<Queue>>,
    ready: Arc<Notify>,
    capacity: usize,
}

impl Outbox {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            queue: Arc::new(Mutex::new(Queue::default())),
            ready: Arc::new(Notify::new()),
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn push(&self, text: String) {
        {
            let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
            if queue.closed {
                return;
            }
            if queue.texts.len() >= self.capacity {
                tracing::trace!("Outbox full, replacing newest queued text");
                queue.texts.pop_back();
            }
            queue.texts.push_back(text);
        }
        self.ready.notify_one();
    }

    /// Stops accepting texts; the reader drains what is queued, then ends
    pub(crate) fn close(&self) {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).closed = true;
        self.ready.notify_one();
    }

    /// Next text to write, or `None` once closed and drained
    pub(crate) async fn next(&self) -> Option<String> {
        loop {
            {
                let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(text) = queue.texts.pop_front() {
                    return Some(text);
                }
                if queue.closed {
                    return None;
                }
            }
            self.ready.notified().await;
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).texts.len()
    }
}

/// Write half of one connection generation.
///
/// A dedicated task owns the sink, so a write stalled by backpressure never
/// holds up the session loop. A failed write is reported as
/// [`TransportEvent::Errored`] for the generation. Dropping the writer aborts
/// the task.
pub(crate) struct Writer {
    outbox: Outbox,
    task: JoinHandle<()>,
}

impl Writer {
    pub(crate) fn spawn(
        generation: Generation,
        mut sink: FrameSink,
        events: mpsc::UnboundedSender<TransportEvent>,
    ) -> Self {
        let outbox = Outbox::new(OUTBOX_CAPACITY);
        let queued = outbox.clone();

        let task = tokio::spawn(async move {
            while let Some(text) = queued.next().await {
                let len = text.len();
                if let Err(e) = sink.send(text).await {
                    tracing::debug!(generation, "Write failed: {}", e);
                    let _ = events.send(TransportEvent::Errored {
                        generation,
                        error: e.to_string(),
                    });
                    return;
                }
                tracing::trace!(generation, "Sent editor content ({} bytes)", len);
            }

            if let Err(e) = sink.close().await {
                tracing::debug!(generation, "Error while closing preview connection: {}", e);
            }
        });

        Self { outbox, task }
    }

    /// Queues the full editor text; returns immediately
    pub(crate) fn send(&self, text: &str) {
        self.outbox.push(text.to_owned());
    }

    /// Flushes queued texts and closes the socket, giving up after
    /// [`CLOSE_TIMEOUT`] if the peer stopped reading.
    pub(crate) async fn close(mut self) {
        self.outbox.close();
        let timeout = Duration::from_millis(CLOSE_TIMEOUT);
        if tokio::time::timeout(timeout, &mut self.task).await.is_err() {
            tracing::debug!("Preview connection did not close within {:?}", timeout);
        }
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

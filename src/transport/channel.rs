use super::connector::{Connection, Connector, InboundFrame};
use super::state::{ChannelOutcome, ChannelState, Generation, TransportEvent};
use super::writer::Writer;
use crate::infrastructure::{ReconnectPolicy, TaskManager};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use url::Url;

/// One logical duplex connection to the preview renderer.
///
/// The channel spans many physical connections. Each attempt gets a new
/// [`Generation`]; the connection object of a failed generation is discarded,
/// never revived. Connection tasks and reconnection timers report back through
/// `events`, and the owner feeds those events to [`handle`](Self::handle).
///
/// All mutation happens through `&mut self`, so the owner decides the
/// ordering: handlers never run concurrently. Writes are handed to a
/// per-generation writer task, so no method waits on the network except
/// [`teardown`](Self::teardown), which is bounded.
pub struct TransportChannel {
    endpoint: Url,
    connector: Arc<dyn Connector>,
    policy: ReconnectPolicy,
    state: ChannelState,
    state_tx: watch::Sender<ChannelState>,
    generation: Generation,
    writer: Option<Writer>,
    events_tx: mpsc::UnboundedSender<TransportEvent>,
    tasks: TaskManager,
    torn_down: bool,
}

impl TransportChannel {
    pub fn new(
        endpoint: Url,
        connector: Arc<dyn Connector>,
        policy: ReconnectPolicy,
        events_tx: mpsc::UnboundedSender<TransportEvent>,
        state_tx: watch::Sender<ChannelState>,
    ) -> Self {
        state_tx.send_replace(ChannelState::Closed);

        Self {
            endpoint,
            connector,
            policy,
            state: ChannelState::Closed,
            state_tx,
            generation: 0,
            writer: None,
            events_tx,
            tasks: TaskManager::new(),
            torn_down: false,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Attempts consumed from the reconnection budget since the last open
    pub fn reconnect_attempts(&self) -> u32 {
        self.policy.attempts()
    }

    fn set_state(&mut self, new_state: ChannelState) {
        if self.state != new_state {
            tracing::debug!(
                generation = self.generation,
                "Channel state {:?} -> {:?}",
                self.state,
                new_state
            );
        }
        self.state = new_state;
        self.state_tx.send_replace(new_state);
    }

    /// Starts a brand-new connection generation.
    ///
    /// The previous writer, if any, is dropped. Events still in flight from
    /// older generations are ignored by [`handle`](Self::handle).
    pub fn connect(&mut self) {
        if self.torn_down {
            tracing::debug!("Channel torn down, not connecting");
            return;
        }

        self.generation += 1;
        self.writer = None;
        self.set_state(ChannelState::Connecting);

        let generation = self.generation;
        let connector = Arc::clone(&self.connector);
        let url = self.endpoint.clone();
        let events = self.events_tx.clone();

        tracing::info!(generation, "Connecting to {}", url);

        self.tasks.spawn(async move {
            let Connection { sink, mut stream } = match connector.connect(&url).await {
                Ok(connection) => connection,
                Err(e) => {
                    let _ = events.send(TransportEvent::Errored {
                        generation,
                        error: e.to_string(),
                    });
                    return;
                }
            };

            if events
                .send(TransportEvent::Opened { generation, sink })
                .is_err()
            {
                return;
            }

            while let Some(frame) = stream.next().await {
                let event = match frame {
                    Ok(InboundFrame::Html(html)) => TransportEvent::Message { generation, html },
                    Ok(InboundFrame::Close) => TransportEvent::Closed { generation },
                    Err(e) => TransportEvent::Errored {
                        generation,
                        error: e.to_string(),
                    },
                };
                if events.send(event).is_err() {
                    return;
                }
            }

            tracing::debug!(generation, "Read task finished");
            let _ = events.send(TransportEvent::Closed { generation });
        });
    }

    /// Applies one event to the channel.
    pub fn handle(&mut self, event: TransportEvent) -> Option<ChannelOutcome> {
        if self.torn_down {
            tracing::debug!("Ignoring {:?} after teardown", event);
            return None;
        }

        if event.generation() != self.generation {
            tracing::debug!(
                current = self.generation,
                "Ignoring stale {:?}",
                event
            );
            return None;
        }

        match event {
            TransportEvent::Opened { sink, .. } => {
                if self.state != ChannelState::Connecting {
                    return None;
                }
                self.writer = Some(Writer::spawn(
                    self.generation,
                    sink,
                    self.events_tx.clone(),
                ));
                self.policy.reset();
                self.set_state(ChannelState::Open);
                tracing::info!(generation = self.generation, "Connected to preview server");
                Some(ChannelOutcome::Opened)
            }
            TransportEvent::Message { html, .. } => {
                if self.state != ChannelState::Open {
                    return None;
                }
                tracing::debug!("Received preview ({} bytes)", html.len());
                Some(ChannelOutcome::Preview(html))
            }
            TransportEvent::Closed { .. } => self.fail("connection closed"),
            TransportEvent::Errored { error, .. } => self.fail(&error),
            TransportEvent::ReconnectDue { .. } => {
                if self.state == ChannelState::Reconnecting {
                    self.connect();
                }
                None
            }
        }
    }

    /// Queues the full editor text for the live connection and returns at
    /// once. Dropped silently unless the channel is open; a failed write comes
    /// back later as an `Errored` event for the generation.
    pub fn send(&self, text: &str) {
        match &self.writer {
            Some(writer) if self.state == ChannelState::Open => writer.send(text),
            _ => tracing::trace!(state = ?self.state, "Dropping send while not open"),
        }
    }

    /// Error and close share one recovery path. Only the first failure of a
    /// generation counts: afterwards the state is no longer Open/Connecting.
    ///
    /// With the budget exhausted the channel closes from whatever state the
    /// failing generation was in, usually the `Connecting` of the last attempt.
    fn fail(&mut self, reason: &str) -> Option<ChannelOutcome> {
        if !matches!(self.state, ChannelState::Open | ChannelState::Connecting) {
            return None;
        }

        self.writer = None;

        match self.policy.next_delay() {
            Some(delay) => {
                tracing::warn!(
                    generation = self.generation,
                    attempt = self.policy.attempts(),
                    max_attempts = self.policy.max_attempts(),
                    "Preview connection lost ({}), reconnecting in {:?}",
                    reason,
                    delay
                );
                self.set_state(ChannelState::Reconnecting);
                self.arm_reconnect(delay);
                None
            }
            None => {
                let attempts = self.policy.attempts();
                tracing::error!(
                    generation = self.generation,
                    "Max reconnection attempts reached ({}). Could not reconnect: {}",
                    attempts,
                    reason
                );
                self.set_state(ChannelState::Closed);
                Some(ChannelOutcome::Terminal { attempts })
            }
        }
    }

    fn arm_reconnect(&mut self, delay: Duration) {
        let generation = self.generation;
        let events = self.events_tx.clone();

        self.tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(TransportEvent::ReconnectDue { generation });
        });
    }

    /// Stops the channel for good: pending timers and readers are aborted and
    /// every later event is ignored.
    pub async fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.tasks.abort_all();

        if let Some(writer) = self.writer.take() {
            writer.close().await;
        }

        self.set_state(ChannelState::Closed);
        tracing::info!("Preview channel torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

use super::connector::FrameSink;

/// Connection state of the preview channel.
///
/// Owned by [`TransportChannel`](super::TransportChannel); everything else
/// observes it through a `watch` receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
    Reconnecting,
}

/// Identifies one physical connection object, from construction to close/error.
pub type Generation = u64;

/// Events flowing from connection tasks and timers back to the channel.
///
/// Every event is tagged with the generation that produced it so events from
/// a discarded connection can be told apart from the live one.
pub enum TransportEvent {
    Opened { generation: Generation, sink: FrameSink },
    Message { generation: Generation, html: String },
    Closed { generation: Generation },
    Errored { generation: Generation, error: String },
    ReconnectDue { generation: Generation },
}

impl TransportEvent {
    pub fn generation(&self) -> Generation {
        match self {
            Self::Opened { generation, .. }
            | Self::Message { generation, .. }
            | Self::Closed { generation }
            | Self::Errored { generation, .. }
            | Self::ReconnectDue { generation } => *generation,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Opened { .. } => "opened",
            Self::Message { .. } => "message",
            Self::Closed { .. } => "closed",
            Self::Errored { .. } => "errored",
            Self::ReconnectDue { .. } => "reconnect_due",
        }
    }
}

impl std::fmt::Debug for TransportEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportEvent")
            .field("kind", &self.kind())
            .field("generation", &self.generation())
            .finish()
    }
}

/// What the supervisor has to do after the channel handled an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// A new connection is open; the latest editor content must be sent
    Opened,
    /// A rendered HTML fragment replacing the whole preview
    Preview(String),
    /// Reconnection budget exhausted; no further attempts will be made
    Terminal { attempts: u32 },
}

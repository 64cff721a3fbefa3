use super::frame::{FrameRequests, FrameWork};
use crate::render::RenderScheduler;
use crate::transport::TransportChannel;
use std::time::Duration;

/// Latest editor text. A single slot: newer content replaces older content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingContent(String);

impl PendingContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn replace(&mut self, text: String) {
        self.0 = text;
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Turns local edit events into channel sends.
///
/// There is no delay on the send path: every edit is sent in full right
/// away and the channel drops it if it is not open. The next successful open
/// resends whatever is latest, so nothing is queued here.
#[derive(Debug)]
pub struct InputEmitter {
    pending: PendingContent,
    frames: FrameRequests,
}

impl InputEmitter {
    pub fn new(initial: impl Into<String>, frame_interval: Duration) -> Self {
        Self {
            pending: PendingContent::new(initial),
            frames: FrameRequests::new(frame_interval),
        }
    }

    /// Handles one local edit carrying the full current editor text.
    pub fn on_edit(
        &mut self,
        text: String,
        channel: &TransportChannel,
        scheduler: &mut RenderScheduler,
    ) {
        self.pending.replace(text);
        self.frames.request_highlight();
        self.frames.request_resize();
        scheduler.record_edit();

        channel.send(self.pending.as_str());
    }

    pub fn pending(&self) -> &str {
        self.pending.as_str()
    }

    pub fn frames(&self) -> &FrameRequests {
        &self.frames
    }

    pub fn take_frame(&mut self) -> FrameWork {
        self.frames.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ReconnectPolicy;
    use crate::testing::{Script, ScriptedConnector};
    use crate::transport::ChannelState;
    use std::sync::Arc;
    use tokio::sync::{mpsc, watch};
    use url::Url;

    #[test]
    fn test_pending_content_is_last_write_wins() {
        let mut pending = PendingContent::new("a");
        pending.replace("ab".into());
        pending.replace("abc".into());
        assert_eq!(pending.as_str(), "abc");
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_while_disconnected_keeps_latest_and_counts_debt() {
        let connector = ScriptedConnector::new(vec![Script::Refuse]);
        let (events_tx, _events_rx) = mpsc::unbounded_channel();
        let (state_tx, _state_rx) = watch::channel(ChannelState::Closed);
        let channel = TransportChannel::new(
            Url::parse("ws://localhost/refresh").unwrap(),
            Arc::new(connector.clone()),
            ReconnectPolicy::default(),
            events_tx,
            state_tx,
        );
        let mut scheduler = RenderScheduler::new(Duration::from_millis(150), 0);
        let mut emitter = InputEmitter::new("", Duration::from_millis(16));

        for text in ["x", "xy"] {
            emitter.on_edit(text.to_string(), &channel, &mut scheduler);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(emitter.pending(), "xy");
        assert_eq!(scheduler.debt(), 2);
        assert!(emitter.frames().is_pending());
        assert!(connector.sent().is_empty());
    }
}

use crate::api::DocumentId;
use crate::types::Result;
use futures::future::BoxFuture;
use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Persists editor content of an open document.
/// Implemented by [`ApiClient`](crate::ApiClient).
pub trait DocumentSaver: Send + Sync + 'static {
    fn save(&self, document_id: DocumentId, text: String) -> BoxFuture<'static, Result<()>>;
}

/// Periodic autosave of the currently open document
pub struct Autosave {
    document_id: DocumentId,
    ticker: Interval,
}

impl Autosave {
    /// First save fires one full interval after the document was opened
    pub fn new(document_id: DocumentId, interval: Duration) -> Self {
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            document_id,
            ticker,
        }
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }
}

/// Resolves on the next autosave tick; never resolves without an open document
pub(crate) async fn next_autosave(autosave: &mut Option<Autosave>) -> DocumentId {
    match autosave {
        Some(autosave) => {
            autosave.ticker.tick().await;
            autosave.document_id
        }
        None => std::future::pending().await,
    }
}

use super::autosave::{Autosave, DocumentSaver, next_autosave};
use crate::api::DocumentId;
use crate::editor::InputEmitter;
use crate::render::{RenderScheduler, RenderTick};
use crate::transport::{ChannelOutcome, TransportChannel, TransportEvent};
use crate::types::Result;
use crate::view::PreviewView;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Requests from [`SessionHandle`](super::SessionHandle) to the event loop
#[derive(Debug)]
pub(crate) enum Command {
    Edit(String),
    OpenDocument { id: DocumentId, content: String },
    CloseDocument,
    Teardown,
}

/// Everything a running session owns.
///
/// Only the event loop in [`run`](Self::run) touches this state, one event at
/// a time, which replaces the page-global variables of a browser editor.
pub(crate) struct SessionState<V: PreviewView> {
    pub channel: TransportChannel,
    pub emitter: InputEmitter,
    pub scheduler: RenderScheduler,
    pub view: V,
    pub saver: Option<Arc<dyn DocumentSaver>>,
    pub autosave_interval: Duration,
}

impl<V: PreviewView> SessionState<V> {
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut events: mpsc::UnboundedReceiver<TransportEvent>,
    ) {
        tracing::info!("Starting preview session");

        let mut render_ticks = self.scheduler.ticker();
        let mut autosave: Option<Autosave> = None;
        let mut saves: JoinSet<Result<()>> = JoinSet::new();

        self.channel.connect();

        loop {
            let frame_deadline = self.emitter.frames().deadline();

            // Local input first, then the network, then timers
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(Command::Edit(text)) => self.on_edit(text),
                    Some(Command::OpenDocument { id, content }) => {
                        autosave = self.open_document(id, content);
                    }
                    Some(Command::CloseDocument) => {
                        if let Some(closed) = autosave.take() {
                            tracing::info!("Closed document {}", closed.document_id());
                        }
                    }
                    Some(Command::Teardown) | None => break,
                },
                Some(event) = events.recv() => {
                    if let Some(outcome) = self.channel.handle(event) {
                        self.apply(outcome);
                    }
                }
                _ = render_ticks.tick() => self.on_render_tick(),
                _ = tokio::time::sleep_until(frame_deadline.unwrap_or_else(Instant::now)),
                    if frame_deadline.is_some() => self.flush_frame(),
                document_id = next_autosave(&mut autosave) => {
                    if let Some(saver) = &self.saver {
                        tracing::debug!("Autosaving document {}", document_id);
                        saves.spawn(saver.save(document_id, self.emitter.pending().to_owned()));
                    }
                }
                Some(result) = saves.join_next() => match result {
                    Ok(Ok(())) => tracing::debug!("Autosave complete"),
                    Ok(Err(e)) => {
                        tracing::error!("Autosave failed: {}", e);
                        self.view.show_error(&format!("Autosave failed: {}", e));
                    }
                    Err(e) => tracing::warn!("Autosave task ended abnormally: {}", e),
                },
            }
        }

        saves.abort_all();
        self.channel.teardown().await;
        tracing::info!("Preview session torn down");
    }

    fn on_edit(&mut self, text: String) {
        self.emitter.on_edit(text, &self.channel, &mut self.scheduler);
    }

    /// Carries out what the channel asked for
    fn apply(&mut self, outcome: ChannelOutcome) {
        match outcome {
            ChannelOutcome::Opened => self.channel.send(self.emitter.pending()),
            ChannelOutcome::Preview(html) => {
                self.view.replace_preview(&html);
                self.scheduler.mark_dirty();
            }
            ChannelOutcome::Terminal { attempts } => {
                self.view.show_error(&format!(
                    "Lost connection to the preview server. Gave up after {} reconnection attempts.",
                    attempts
                ));
            }
        }
    }

    fn on_render_tick(&mut self) {
        match self.scheduler.tick() {
            RenderTick::Typeset => {
                tracing::trace!(passes = self.scheduler.passes(), "Typesetting preview");
                self.view.typeset();
            }
            RenderTick::Deferred => {
                tracing::trace!(debt = self.scheduler.debt(), "Typesetting deferred");
            }
            RenderTick::Idle => {}
        }
    }

    fn flush_frame(&mut self) {
        let work = self.emitter.take_frame();
        if work.highlight {
            self.view.refresh_highlight(self.emitter.pending());
        }
        if work.resize {
            self.view.resize_editor();
        }
    }

    /// Loads a stored document into the editor and restarts autosave for it.
    /// Loading counts as an edit so the preview follows.
    fn open_document(&mut self, id: DocumentId, content: String) -> Option<Autosave> {
        tracing::info!("Opening document {}", id);
        self.view.load_editor(&content);
        self.on_edit(content);

        if self.saver.is_none() {
            tracing::debug!("No document saver configured, autosave disabled");
            return None;
        }
        Some(Autosave::new(id, self.autosave_interval))
    }
}

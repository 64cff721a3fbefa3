/// The page elements the live-preview core reads from and writes to.
///
/// Implementations are resolved once at session start and owned by the
/// session, so the core never looks anything up by itself. A browser build
/// would back this with DOM nodes; tests back it with a recorder.
pub trait PreviewView: Send + 'static {
    /// Replaces the entire preview area with a rendered HTML fragment.
    /// The fragment comes from the trusted renderer and is inserted verbatim.
    fn replace_preview(&mut self, html: &str);

    /// Re-runs syntax highlighting over the editor text (next frame)
    fn refresh_highlight(&mut self, text: &str);

    /// Grows or shrinks the editor to fit its content (next frame)
    fn resize_editor(&mut self);

    /// Runs the formula typesetting pass over the whole preview
    fn typeset(&mut self);

    /// Replaces the editor content, e.g. when a stored document is opened
    fn load_editor(&mut self, text: &str);

    /// Shows an error on the page's shared error surface
    fn show_error(&mut self, message: &str);
}

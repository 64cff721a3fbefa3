/// Path the preview socket is served on, relative to the page origin
pub const REFRESH_PATH: &str = "/refresh";

/// Collaborator endpoints (paths relative to the page origin)
pub mod api_paths {
    pub const LOG_IN: &str = "/log_in";
    pub const CREATE_USER: &str = "/create_user";
    pub const LOG_OUT: &str = "/log_out";
    pub const CREATE_DOCUMENT: &str = "/create_document";
    pub const FETCH_DOCUMENTS: &str = "/fetch_documents";
    pub const FETCH_CONTENT: &str = "/fetch_content";
    pub const SAVE: &str = "/save";
    pub const DELETE_DOCUMENT: &str = "/delete_document";
    pub const DOWNLOAD: &str = "/download";
    pub const SEND_RECOVERY: &str = "/send_recovery";
    pub const TRY_RECOVERY_CODE: &str = "/try_recovery_code";
}

/// Default maximum number of reconnection attempts before giving up
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// Default fixed delay between reconnection attempts (milliseconds)
pub const RECONNECT_DELAY: u64 = 2000;

/// Default render tick interval (milliseconds)
pub const RENDER_INTERVAL: u64 = 150;

/// Default next-frame interval for highlight and resize work (milliseconds)
pub const FRAME_INTERVAL: u64 = 16;

/// Default autosave interval while a document is open (milliseconds)
pub const AUTOSAVE_INTERVAL: u64 = 60_000;

/// Environment variable prefix for session options
pub const ENV_PREFIX: &str = "LIVE_PREVIEW_";

/// Editor texts queued per connection before newer ones overwrite the newest
pub const OUTBOX_CAPACITY: usize = 32;

/// How long teardown waits for the writer to close the socket (milliseconds)
pub const CLOSE_TIMEOUT: u64 = 1000;

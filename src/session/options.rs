use crate::types::{
    AUTOSAVE_INTERVAL, ENV_PREFIX, FRAME_INTERVAL, MAX_RECONNECT_ATTEMPTS, PreviewError,
    RECONNECT_DELAY, RENDER_INTERVAL, Result,
};
use std::str::FromStr;
use std::time::Duration;

/// Tunables of a preview session. Durations are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub max_reconnect_attempts: u32,
    pub reconnect_delay_ms: u64,
    pub render_interval_ms: u64,
    pub frame_interval_ms: u64,
    pub autosave_interval_ms: u64,
    /// Render debt the session starts with; delays the first settle pass
    pub initial_render_debt: u32,
    /// Editor content before the first edit
    pub initial_content: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_reconnect_attempts: MAX_RECONNECT_ATTEMPTS,
            reconnect_delay_ms: RECONNECT_DELAY,
            render_interval_ms: RENDER_INTERVAL,
            frame_interval_ms: FRAME_INTERVAL,
            autosave_interval_ms: AUTOSAVE_INTERVAL,
            initial_render_debt: 0,
            initial_content: String::new(),
        }
    }
}

impl SessionOptions {
    /// Defaults overridden by `LIVE_PREVIEW_*` environment variables, e.g.
    /// `LIVE_PREVIEW_RECONNECT_DELAY_MS=500`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut options = Self::default();

        override_with(&lookup, "MAX_RECONNECT_ATTEMPTS", &mut options.max_reconnect_attempts)?;
        override_with(&lookup, "RECONNECT_DELAY_MS", &mut options.reconnect_delay_ms)?;
        override_with(&lookup, "RENDER_INTERVAL_MS", &mut options.render_interval_ms)?;
        override_with(&lookup, "FRAME_INTERVAL_MS", &mut options.frame_interval_ms)?;
        override_with(&lookup, "AUTOSAVE_INTERVAL_MS", &mut options.autosave_interval_ms)?;
        override_with(&lookup, "INITIAL_RENDER_DEBT", &mut options.initial_render_debt)?;

        Ok(options)
    }

    /// Rejects values that would make a timer spin
    pub fn validate(&self) -> Result<()> {
        let intervals = [
            ("reconnect_delay_ms", self.reconnect_delay_ms),
            ("render_interval_ms", self.render_interval_ms),
            ("frame_interval_ms", self.frame_interval_ms),
            ("autosave_interval_ms", self.autosave_interval_ms),
        ];

        for (name, value) in intervals {
            if value == 0 {
                return Err(PreviewError::Config(format!("{} must be non-zero", name)));
            }
        }

        Ok(())
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_interval_ms)
    }
}

fn override_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    target: &mut T,
) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let key = format!("{}{}", ENV_PREFIX, name);
    if let Some(raw) = lookup(&key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|e| PreviewError::Config(format!("invalid {}='{}': {}", key, raw, e)))?;
    }
    Ok(())
}

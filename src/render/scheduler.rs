use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Count of content updates not yet reflected in a typesetting pass.
/// Never negative: paying off an empty debt is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderDebt(u32);

impl RenderDebt {
    pub fn incur(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Pays one unit off. Returns `true` while debt is still outstanding.
    pub fn pay(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 > 0
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Decision taken on one render tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTick {
    /// Edits are still settling; skip this tick
    Deferred,
    /// Run the typesetting pass now
    Typeset,
    /// Nothing changed since the last pass
    Idle,
}

/// Decides when the expensive typesetting pass runs.
///
/// Each edit adds one unit of debt; each tick pays one unit. When the debt is
/// paid off the pass runs once, so a burst of K edits followed by silence
/// typesets exactly once, on the K-th tick after the last edit. Inbound
/// previews do not add debt but make the next debt-free tick typeset again.
/// A fresh scheduler is unsettled, so the first debt-free tick performs a
/// settle pass even if nothing was edited yet.
#[derive(Debug)]
pub struct RenderScheduler {
    interval: Duration,
    debt: RenderDebt,
    settled: bool,
    passes: u64,
}

impl RenderScheduler {
    pub fn new(interval: Duration, initial_debt: u32) -> Self {
        Self {
            interval,
            debt: RenderDebt(initial_debt),
            settled: false,
            passes: 0,
        }
    }

    pub fn record_edit(&mut self) {
        self.debt.incur();
        self.settled = false;
    }

    /// New preview content arrived; it needs a pass once edits settle
    pub fn mark_dirty(&mut self) {
        self.settled = false;
    }

    pub fn tick(&mut self) -> RenderTick {
        if self.debt.get() > 0 && self.debt.pay() {
            return RenderTick::Deferred;
        }

        if self.settled {
            return RenderTick::Idle;
        }

        self.settled = true;
        self.passes += 1;
        RenderTick::Typeset
    }

    pub fn debt(&self) -> u32 {
        self.debt.get()
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// A recurring timer whose first tick fires one interval from now
    pub fn ticker(&self) -> Interval {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    }
}

//! Tick Kernel: periodic updates driven by a global tick counter.
//!
//! # Invariants
//! - A ticker only runs when enabled and its rate divides the global tick.
//! - A tick rate of zero never runs.
//! - Average update time is maintained incrementally over every run.
//! - A driver never runs a ticker pinned to another lane.

pub mod clock;
pub mod driver;
pub mod ticker;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use driver::{ScheduleError, TickClock, TickDriver};
pub use ticker::{Lane, Scheduled, SharedUpdate, Ticker, TickerStats, Update, UpdateFn};

pub fn crate_info() -> &'static str {
    "ember-kernel v0.1.0"
}

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::{Clock, MonotonicClock};

/// A stateful object advanced by the global tick.
pub trait Update {
    fn update(&mut self, tick: u64);
}

/// A unit advanced through a shared reference.
///
/// Implemented by types that keep their own interior mutability, so that
/// an `Rc` handle can be scheduled while other handles call into the same
/// value during its update.
pub trait SharedUpdate {
    fn update(&self, tick: u64);
}

impl<T: Update + ?Sized> SharedUpdate for RefCell<T> {
    fn update(&self, tick: u64) {
        self.borrow_mut().update(tick);
    }
}

impl<T: SharedUpdate + ?Sized> Update for Rc<T> {
    fn update(&mut self, tick: u64) {
        SharedUpdate::update(&**self, tick);
    }
}

impl<T: Update + ?Sized> Update for Box<T> {
    fn update(&mut self, tick: u64) {
        (**self).update(tick);
    }
}

/// Adapts a closure into an [`Update`] unit.
pub struct UpdateFn<F>(pub F);

impl<F: FnMut(u64)> Update for UpdateFn<F> {
    fn update(&mut self, tick: u64) {
        (self.0)(tick);
    }
}

/// Logical thread identity used for ticker affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lane(pub u32);

impl Lane {
    /// The lane that pumps window events.
    pub const MAIN: Lane = Lane(0);
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lane#{}", self.0)
    }
}

/// Wraps an [`Update`] unit that runs every `rate` ticks.
///
/// The ticker only stores its lane affinity; placing it on the right thread
/// is the job of whoever drives it (see [`crate::TickDriver`]). A rate of
/// zero means the unit never runs.
pub struct Ticker<U, C = MonotonicClock> {
    unit: U,
    clock: C,
    label: String,
    rate: u32,
    affinity: Option<Lane>,
    enabled: bool,
    calls: u64,
    /// Running mean, in seconds.
    average_update_time: f64,
    last_update_time: Duration,
}

impl<U: Update> Ticker<U> {
    pub fn new(unit: U, rate: u32) -> Self {
        Self::with_clock(unit, rate, MonotonicClock::new())
    }

    /// A ticker that runs on every tick.
    pub fn every_tick(unit: U) -> Self {
        Self::new(unit, 1)
    }
}

impl<U: Update, C: Clock> Ticker<U, C> {
    pub fn with_clock(unit: U, rate: u32, clock: C) -> Self {
        Self {
            unit,
            clock,
            label: String::from("ticker"),
            rate,
            affinity: None,
            enabled: true,
            calls: 0,
            average_update_time: 0.0,
            last_update_time: Duration::ZERO,
        }
    }

    /// Name shown in scheduler reports and logs.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Pin this ticker to a lane.
    pub fn pinned(mut self, lane: Lane) -> Self {
        self.affinity = Some(lane);
        self
    }

    /// Whether `tick` would run the unit.
    pub fn is_due(&self, tick: u64) -> bool {
        self.enabled && self.rate != 0 && tick % u64::from(self.rate) == 0
    }

    /// Run the unit if it is due on `tick`. Returns whether it ran.
    pub fn tick(&mut self, tick: u64) -> bool {
        if !self.is_due(tick) {
            return false;
        }
        let start = self.clock.now();
        self.unit.update(tick);
        let elapsed = self.clock.now().saturating_sub(start);

        let n = self.calls as f64;
        self.average_update_time =
            (self.average_update_time * n + elapsed.as_secs_f64()) / (n + 1.0);
        self.calls += 1;
        self.last_update_time = elapsed;
        true
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: u32) {
        self.rate = rate;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn affinity(&self) -> Option<Lane> {
        self.affinity
    }

    pub fn set_affinity(&mut self, lane: Lane) {
        self.affinity = Some(lane);
    }

    pub fn clear_affinity(&mut self) {
        self.affinity = None;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of times the unit has run.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Mean update duration in seconds over every run so far.
    pub fn average_update_time(&self) -> f64 {
        self.average_update_time
    }

    pub fn last_update_time(&self) -> Duration {
        self.last_update_time
    }

    pub fn unit(&self) -> &U {
        &self.unit
    }

    pub fn unit_mut(&mut self) -> &mut U {
        &mut self.unit
    }

    pub fn into_inner(self) -> U {
        self.unit
    }

    pub fn stats(&self) -> TickerStats {
        TickerStats {
            label: self.label.clone(),
            rate: self.rate,
            enabled: self.enabled,
            affinity: self.affinity,
            calls: self.calls,
            average_update_time: self.average_update_time,
            last_update_time: self.last_update_time,
        }
    }
}

/// Object-safe view of a ticker, used by drivers holding mixed units.
pub trait Scheduled {
    fn tick(&mut self, tick: u64) -> bool;
    fn affinity(&self) -> Option<Lane>;
    fn stats(&self) -> TickerStats;
}

impl<U: Update, C: Clock> Scheduled for Ticker<U, C> {
    fn tick(&mut self, tick: u64) -> bool {
        Ticker::tick(self, tick)
    }

    fn affinity(&self) -> Option<Lane> {
        self.affinity
    }

    fn stats(&self) -> TickerStats {
        Ticker::stats(self)
    }
}

/// Snapshot of a ticker's configuration and telemetry.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerStats {
    pub label: String,
    pub rate: u32,
    pub enabled: bool,
    pub affinity: Option<Lane>,
    pub calls: u64,
    /// Seconds.
    pub average_update_time: f64,
    pub last_update_time: Duration,
}

impl fmt::Display for TickerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: rate={} enabled={} calls={} avg={:.3}ms",
            self.label,
            self.rate,
            self.enabled,
            self.calls,
            self.average_update_time * 1000.0
        )?;
        if let Some(lane) = self.affinity {
            write!(f, " {lane}")?;
        }
        Ok(())
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::ticker::{Lane, Scheduled, TickerStats};

/// Errors from scheduling tickers on a driver.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("ticker `{label}` is pinned to {pinned} but this driver serves {driver}")]
    LaneMismatch {
        label: String,
        pinned: Lane,
        driver: Lane,
    },
}

/// Monotonically increasing global tick counter, shareable across lanes.
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    tick: Arc<AtomicU64>,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next tick that `advance` will hand out.
    pub fn now(&self) -> u64 {
        self.tick.load(Ordering::Acquire)
    }

    /// Claim the current tick and move the counter forward by one.
    pub fn advance(&self) -> u64 {
        self.tick.fetch_add(1, Ordering::AcqRel)
    }
}

/// Runs the tickers of one lane against the global tick.
///
/// Tickers without affinity may run on any driver; a ticker pinned to a
/// different lane is refused at scheduling time.
pub struct TickDriver {
    lane: Lane,
    clock: TickClock,
    entries: Vec<Box<dyn Scheduled>>,
    budget: Option<Duration>,
}

impl TickDriver {
    pub fn new(lane: Lane) -> Self {
        Self::with_clock(lane, TickClock::new())
    }

    pub fn with_clock(lane: Lane, clock: TickClock) -> Self {
        Self {
            lane,
            clock,
            entries: Vec::new(),
            budget: None,
        }
    }

    /// Warn whenever a single update takes longer than `budget`.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a ticker. Entries run in scheduling order.
    pub fn schedule(&mut self, entry: impl Scheduled + 'static) -> Result<(), ScheduleError> {
        if let Some(pinned) = entry.affinity() {
            if pinned != self.lane {
                return Err(ScheduleError::LaneMismatch {
                    label: entry.stats().label,
                    pinned,
                    driver: self.lane,
                });
            }
        }
        tracing::debug!(lane = %self.lane, label = %entry.stats().label, "ticker scheduled");
        self.entries.push(Box::new(entry));
        Ok(())
    }

    /// Offer `tick` to every entry. Returns how many ran.
    pub fn run(&mut self, tick: u64) -> usize {
        let _span = tracing::info_span!("tick_driver_run", lane = %self.lane, tick).entered();
        let mut fired = 0;
        for entry in &mut self.entries {
            if !entry.tick(tick) {
                continue;
            }
            fired += 1;
            if let Some(budget) = self.budget {
                let stats = entry.stats();
                if stats.last_update_time > budget {
                    tracing::warn!(
                        label = %stats.label,
                        took_us = stats.last_update_time.as_micros() as u64,
                        budget_us = budget.as_micros() as u64,
                        "ticker update exceeded budget"
                    );
                }
            }
        }
        fired
    }

    /// Claim the next global tick and run it.
    pub fn advance(&mut self) -> u64 {
        let tick = self.clock.advance();
        self.run(tick);
        tick
    }

    /// Telemetry for every scheduled entry, in scheduling order.
    pub fn report(&self) -> Vec<TickerStats> {
        self.entries.iter().map(|e| e.stats()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ticker::{Ticker, UpdateFn};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(&'static str, u64)>>>;

    fn recorder(log: Log, name: &'static str) -> UpdateFn<impl FnMut(u64)> {
        UpdateFn(move |tick: u64| log.borrow_mut().push((name, tick)))
    }

    #[test]
    fn runs_entries_in_order_at_their_rates() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = TickDriver::new(Lane::MAIN);
        driver.schedule(Ticker::new(recorder(log.clone(), "fast"), 1)).unwrap();
        driver.schedule(Ticker::new(recorder(log.clone(), "slow"), 2)).unwrap();

        for _ in 0..3 {
            driver.advance();
        }
        assert_eq!(
            *log.borrow(),
            vec![("fast", 0), ("slow", 0), ("fast", 1), ("fast", 2), ("slow", 2)]
        );
    }

    #[test]
    fn refuses_ticker_pinned_elsewhere() {
        let mut driver = TickDriver::new(Lane::MAIN);
        let pinned = Ticker::new(UpdateFn(|_: u64| {}), 1)
            .labeled("audio")
            .pinned(Lane(2));
        let err = driver.schedule(pinned).unwrap_err();
        assert!(err.to_string().contains("audio"));
        assert!(driver.is_empty());
    }

    #[test]
    fn accepts_ticker_pinned_to_own_lane() {
        let mut driver = TickDriver::new(Lane(2));
        let pinned = Ticker::new(UpdateFn(|_: u64| {}), 1).pinned(Lane(2));
        assert!(driver.schedule(pinned).is_ok());
        assert_eq!(driver.run(0), 1);
    }

    #[test]
    fn shared_clock_hands_out_each_tick_once() {
        let clock = TickClock::new();
        let mut a = TickDriver::with_clock(Lane(0), clock.clone());
        let b = TickDriver::with_clock(Lane(1), clock.clone());
        assert_eq!(a.advance(), 0);
        assert_eq!(a.advance(), 1);
        assert_eq!(b.clock().now(), 2);
    }

    #[test]
    fn report_reflects_runs() {
        let clock = ManualClock::new();
        let burn = clock.clone();
        let ticker = Ticker::with_clock(
            UpdateFn(move |_: u64| burn.advance(Duration::from_millis(4))),
            1,
            clock,
        )
        .labeled("physics");
        let mut driver = TickDriver::new(Lane::MAIN).with_budget(Duration::from_millis(1));
        driver.schedule(ticker).unwrap();
        driver.run(0);
        driver.run(1);

        let report = driver.report();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].label, "physics");
        assert_eq!(report[0].calls, 2);
        assert!((report[0].average_update_time - 0.004).abs() < 1e-9);
    }
}

use crate::pipeline::{FlightAgent, RunReport};
use chrono::{Duration as TimeDelta, NaiveDateTime, NaiveTime};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Wall-clock source, local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Fires once a day at a fixed local time.
///
/// Missed occurrences are not replayed: re-arming always targets the first
/// occurrence after the given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTrigger {
    at: NaiveTime,
    next_run: NaiveDateTime,
}

impl DailyTrigger {
    pub fn new(at: NaiveTime, now: NaiveDateTime) -> Self {
        Self { at, next_run: Self::next_after(at, now) }
    }

    /// First occurrence of `at` strictly after `now`
    pub fn next_after(at: NaiveTime, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(at);
        if today > now {
            today
        } else {
            today + TimeDelta::days(1)
        }
    }

    pub fn next_run(&self) -> NaiveDateTime {
        self.next_run
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        now >= self.next_run
    }

    pub fn rearm(&mut self, now: NaiveDateTime) {
        self.next_run = Self::next_after(self.at, now);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Immediate pass at start, then one pass per daily trigger, polled on a
/// coarse sleep. Single task; passes never overlap.
pub struct Scheduler {
    agent: FlightAgent,
    trigger: DailyTrigger,
    poll_interval: Duration,
    clock: Arc<dyn Clock>,
    state: SchedulerState,
    passes: u64,
}

impl Scheduler {
    pub fn new(agent: FlightAgent, at: NaiveTime, poll_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        let trigger = DailyTrigger::new(at, clock.now());
        Self {
            agent,
            trigger,
            poll_interval,
            clock,
            state: SchedulerState::Idle,
            passes: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn next_run(&self) -> NaiveDateTime {
        self.trigger.next_run()
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Run one full pass now and re-arm the daily trigger from the moment the
    /// pass started. A trigger time crossed while the pass runs still fires.
    pub async fn run_pass(&mut self) -> RunReport {
        self.state = SchedulerState::Running;
        self.passes += 1;
        let started = self.clock.now();
        info!(pass = self.passes, routes = self.agent.routes().len(), "Starting pass");

        let report = self.agent.run_pass().await;

        self.trigger.rearm(started);
        self.state = SchedulerState::Idle;
        info!(next_run = %self.trigger.next_run(), "Idle until next trigger");
        report
    }

    /// Check the trigger once; runs a pass if it is due
    pub async fn poll(&mut self) -> Option<RunReport> {
        let now = self.clock.now();
        if self.trigger.is_due(now) {
            Some(self.run_pass().await)
        } else {
            debug!(now = %now, next_run = %self.trigger.next_run(), "Not due");
            None
        }
    }

    /// Immediate pass, then poll until `shutdown` resolves. Shutdown is only
    /// observed between passes; a running pass always completes.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        self.run_pass().await;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(passes = self.passes, "Shutdown requested, scheduler stopped");
                    break;
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
            self.poll().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn test_next_run_today_when_still_ahead() {
        let trigger = DailyTrigger::new(nine(), at(1, 8, 30));
        assert_eq!(trigger.next_run(), at(1, 9, 0));
        assert!(!trigger.is_due(at(1, 8, 59)));
        assert!(trigger.is_due(at(1, 9, 0)));
    }

    #[test]
    fn test_next_run_tomorrow_when_passed() {
        assert_eq!(DailyTrigger::new(nine(), at(1, 9, 0)).next_run(), at(2, 9, 0));
        assert_eq!(DailyTrigger::new(nine(), at(1, 17, 45)).next_run(), at(2, 9, 0));
    }

    #[test]
    fn test_missed_ticks_are_not_backfilled() {
        let mut trigger = DailyTrigger::new(nine(), at(1, 8, 0));
        // process was suspended for three days
        let resumed = at(4, 13, 0);
        assert!(trigger.is_due(resumed));

        trigger.rearm(resumed);
        assert_eq!(trigger.next_run(), at(5, 9, 0));
        assert!(!trigger.is_due(resumed));
    }

    #[test]
    fn test_month_rollover() {
        let trigger = DailyTrigger::new(nine(), at(30, 10, 0));
        assert_eq!(trigger.next_run(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap().and_time(nine()));
    }
}

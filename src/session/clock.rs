//! Repeating tick timers for the two session cadences.
//!
//! The engine loop owns one timer per cadence (50 ms frame refresh,
//! 1000 ms elapsed counter) and polls them each iteration. A timer is
//! armed with an explicit start instant and cancelled explicitly; once
//! cancelled it reports no due ticks until re-armed, so cancellation
//! before a state transition guarantees no stray tick is delivered after.
use std::time::{Duration, Instant};

pub const FAST_TICK: Duration = Duration::from_millis(50);
pub const SLOW_TICK: Duration = Duration::from_millis(1000);

pub struct TickTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Arm the timer; the first tick is due one period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Count the ticks due at `now`, advancing the schedule past them.
    /// Returns 0 while cancelled.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut ticks = 0;
        while due <= now {
            ticks += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_timer_reports_nothing() {
        let mut timer = TickTimer::new(FAST_TICK);
        assert!(!timer.is_armed());
        assert_eq!(timer.poll(Instant::now()), 0);
    }

    #[test]
    fn counts_due_ticks_and_advances() {
        let start = Instant::now();
        let mut timer = TickTimer::new(Duration::from_millis(100));
        timer.arm(start);
        assert_eq!(timer.poll(start), 0);
        assert_eq!(timer.poll(start + Duration::from_millis(100)), 1);
        assert_eq!(timer.poll(start + Duration::from_millis(150)), 0);
        // 350ms in: ticks at 200 and 300 are both due.
        assert_eq!(timer.poll(start + Duration::from_millis(350)), 2);
    }

    #[test]
    fn cancel_silences_until_rearmed() {
        let start = Instant::now();
        let mut timer = TickTimer::new(Duration::from_millis(100));
        timer.arm(start);
        timer.cancel();
        assert!(!timer.is_armed());
        assert_eq!(timer.poll(start + Duration::from_secs(10)), 0);
        let resume = start + Duration::from_secs(20);
        timer.arm(resume);
        assert_eq!(timer.poll(resume + Duration::from_millis(100)), 1);
    }
}

use std::time::{Duration, Instant};

/// Fixed-cadence callback schedule driven by the dialog's event loop.
///
/// The timer never runs anything itself: the loop asks [`RefreshTimer::poll_due`]
/// after each wake-up and performs the refresh when it answers `true`.
/// Missed ticks are not replayed.
#[derive(Debug, Clone)]
pub struct RefreshTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RefreshTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// How long the loop may wait for input before the next tick is due.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now),
            None => self.interval,
        }
    }

    /// Returns `true` once per elapsed interval and schedules the next tick.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let next = due + self.interval;
        self.next_due = Some(if next > now { next } else { now + self.interval });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut timer = RefreshTimer::new(Duration::from_millis(1000));
        assert!(!timer.poll_due(start));

        timer.arm(start);
        assert_eq!(timer.time_until_due(start), Duration::from_millis(1000));
        assert!(!timer.poll_due(start + Duration::from_millis(999)));
        assert!(timer.poll_due(start + Duration::from_millis(1000)));
        assert!(!timer.poll_due(start + Duration::from_millis(1500)));
        assert_eq!(
            timer.time_until_due(start + Duration::from_millis(1500)),
            Duration::from_millis(500)
        );
        assert!(timer.poll_due(start + Duration::from_millis(2000)));
    }

    #[test]
    fn late_wakeup_does_not_replay_missed_ticks() {
        let start = Instant::now();
        let mut timer = RefreshTimer::new(Duration::from_millis(100));
        timer.arm(start);

        let late = start + Duration::from_millis(550);
        assert!(timer.poll_due(late));
        assert!(!timer.poll_due(late));
        assert_eq!(timer.time_until_due(late), Duration::from_millis(100));
    }

    #[test]
    fn disarmed_timer_never_fires() {
        let start = Instant::now();
        let mut timer = RefreshTimer::new(Duration::from_millis(10));
        timer.arm(start);
        timer.disarm();
        assert!(!timer.is_armed());
        assert!(!timer.poll_due(start + Duration::from_secs(5)));
    }
}

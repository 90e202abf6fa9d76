//! Fixed-rate frame scheduler.
//!
//! The scheduler never runs on its own. It holds at most one pending deadline;
//! the event loop asks it how long to wait and whether the deadline has
//! passed. A fire disarms it, and the owner re-arms it for the next frame
//! once the frame has been handled, so there is never more than one frame
//! signal in flight and stopping is just dropping the deadline.

use std::time::{Duration, Instant};

/// Time between frame advances.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Self-rescheduling frame timer.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    /// When the next frame is due, if armed.
    deadline: Option<Instant>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer for one interval from `now`. Starting an already armed
    /// scheduler keeps its pending deadline.
    pub fn start(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + FRAME_INTERVAL);
        }
    }

    /// Arm the timer for the frame after the one just handled.
    pub fn rearm(&mut self, now: Instant) {
        self.deadline = Some(now + FRAME_INTERVAL);
    }

    /// Drop any pending deadline. Stopping twice is the same as stopping once.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    /// How long the event loop may block before the next frame is due.
    /// Falls back to `idle` while stopped.
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(now),
            None => idle,
        }
    }

    /// Consume the pending deadline if it has passed. Returns true exactly
    /// once per armed interval.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: Duration = Duration::from_millis(250);

    #[test]
    fn test_new_scheduler_is_stopped() {
        let mut scheduler = FrameScheduler::new();
        let now = Instant::now();
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.timeout(now, IDLE), IDLE);
        assert!(!scheduler.fire(now + FRAME_INTERVAL * 10));
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut scheduler = FrameScheduler::new();
        let start = Instant::now();
        scheduler.start(start);

        assert_eq!(scheduler.timeout(start, IDLE), FRAME_INTERVAL);
        assert!(!scheduler.fire(start + Duration::from_millis(79)));
        assert!(scheduler.fire(start + FRAME_INTERVAL));
        // Disarmed until the owner re-arms it.
        assert!(!scheduler.is_active());
        assert!(!scheduler.fire(start + FRAME_INTERVAL * 2));

        let handled = start + FRAME_INTERVAL;
        scheduler.rearm(handled);
        assert!(scheduler.fire(handled + FRAME_INTERVAL));
    }

    #[test]
    fn test_start_does_not_stack_deadlines() {
        let mut scheduler = FrameScheduler::new();
        let start = Instant::now();
        scheduler.start(start);
        scheduler.start(start + Duration::from_millis(50));
        assert!(scheduler.fire(start + FRAME_INTERVAL));
        assert!(!scheduler.fire(start + Duration::from_millis(130)));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let start = Instant::now();

        let mut once = FrameScheduler::new();
        once.start(start);
        once.stop();

        let mut twice = FrameScheduler::new();
        twice.start(start);
        twice.stop();
        twice.stop();

        assert_eq!(once.is_active(), twice.is_active());
        assert_eq!(once.timeout(start, IDLE), twice.timeout(start, IDLE));
        assert!(!once.fire(start + FRAME_INTERVAL));
        assert!(!twice.fire(start + FRAME_INTERVAL));
    }

    #[test]
    fn test_overdue_timeout_is_zero() {
        let mut scheduler = FrameScheduler::new();
        let start = Instant::now();
        scheduler.start(start);
        assert_eq!(scheduler.timeout(start + FRAME_INTERVAL * 3, IDLE), Duration::ZERO);
    }
}

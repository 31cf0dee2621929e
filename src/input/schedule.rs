/// A repeating deferred step, polled by the frame tick.
///
/// Owning the task is the only way to run it; dropping it cancels it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledTask {
    period_ms: f64,
    next_due_ms: f64,
}

impl ScheduledTask {
    /// First step fires one period after `now_ms`
    pub fn start(now_ms: f64, period_ms: f64) -> Self {
        let period_ms = period_ms.max(1.0);
        Self {
            period_ms,
            next_due_ms: now_ms + period_ms,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn next_due_ms(&self) -> f64 {
        self.next_due_ms
    }

    /// Returns true when a step is due and schedules the next one.
    ///
    /// At most one step per poll: a task that fell behind re-anchors to
    /// `now + period` instead of firing a burst of catch-up steps.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms += self.period_ms;
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms + self.period_ms;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let mut task = ScheduledTask::start(0.0, 16.0);
        assert!(!task.poll(10.0));
        assert!(task.poll(16.0));
        assert!(!task.poll(20.0));
        assert!(task.poll(32.5));
        assert_eq!(task.next_due_ms(), 48.0);
    }

    #[test]
    fn late_poll_does_not_burst() {
        let mut task = ScheduledTask::start(0.0, 16.0);
        assert!(task.poll(1000.0));
        assert!(!task.poll(1000.0));
        assert_eq!(task.next_due_ms(), 1016.0);
    }
}

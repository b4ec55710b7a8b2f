/// Identifies a scheduled task so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelToken(u64);

// Float steps such as 1000/60 do not sum back to whole milliseconds exactly.
const DUE_TOLERANCE_MS: f64 = 1e-6;

#[derive(Clone, Copy, Debug)]
struct Deferred {
    remaining_ms: f64,
    token: CancelToken,
}

/// Virtual clock holding at most one deferred task.
///
/// Time only moves when the host calls [`Scheduler::advance`], so tests can
/// step through a delay without waiting on a real timer. The pending task
/// counts its own remaining time down, so elapsed time can grow without bound.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now_ms: f64,
    next_token: u64,
    pending: Option<Deferred>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedules the task `delay_ms` from now, replacing any pending one.
    pub fn schedule(&mut self, delay_ms: u32) -> CancelToken {
        self.next_token += 1;
        let token = CancelToken(self.next_token);
        self.pending = Some(Deferred {
            remaining_ms: f64::from(delay_ms),
            token,
        });
        token
    }

    /// Cancels the task if it is still pending. Returns whether it was.
    pub fn cancel(&mut self, token: CancelToken) -> bool {
        match self.pending {
            Some(task) if task.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Moves time forward. Returns `true` if the pending task fell due, in
    /// which case it is consumed and the caller must run it.
    ///
    /// Negative or non-finite steps count as zero.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.now_ms = (self.now_ms + dt_ms).min(f64::MAX);
        let Some(task) = self.pending.as_mut() else {
            return false;
        };
        task.remaining_ms -= dt_ms;
        if task.remaining_ms <= DUE_TOLERANCE_MS {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1000);
        assert!(!scheduler.advance(999.0));
        assert!(scheduler.is_pending());
        assert!(scheduler.advance(1.0));
        assert!(!scheduler.is_pending());
        assert!(!scheduler.advance(5000.0));
        assert_eq!(scheduler.now_ms(), 6000.0);
    }

    #[test]
    fn test_cancel_with_token() {
        let mut scheduler = Scheduler::new();
        let token = scheduler.schedule(100);
        assert!(scheduler.cancel(token));
        assert!(!scheduler.cancel(token));
        assert!(!scheduler.advance(200.0));
    }

    #[test]
    fn test_stale_token_does_not_cancel_newer_task() {
        let mut scheduler = Scheduler::new();
        let old = scheduler.schedule(100);
        scheduler.schedule(100);
        assert!(!scheduler.cancel(old));
        assert!(scheduler.advance(100.0));
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0);
        assert!(scheduler.advance(0.0));
    }

    #[test]
    fn test_frame_sized_steps_add_up() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1000);
        let frame = 1000.0 / 60.0;
        for _ in 0..59 {
            assert!(!scheduler.advance(frame));
        }
        assert!(scheduler.advance(frame));
    }

    #[test]
    fn test_sub_millisecond_steps_add_up() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10);
        let mut fired = false;
        for _ in 0..40 {
            fired |= scheduler.advance(0.25);
        }
        assert!(fired);
    }

    #[test]
    fn test_huge_step_then_schedule_keeps_full_delay() {
        let mut scheduler = Scheduler::new();
        assert!(!scheduler.advance(f64::MAX));
        assert!(!scheduler.advance(f64::MAX));
        scheduler.schedule(1000);
        assert!(!scheduler.advance(999.0));
        assert!(scheduler.advance(1.0));
    }

    #[test]
    fn test_bad_steps_do_not_move_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10);
        assert!(!scheduler.advance(f64::NAN));
        assert!(!scheduler.advance(f64::INFINITY));
        assert!(!scheduler.advance(-50.0));
        assert_eq!(scheduler.now_ms(), 0.0);
        assert!(scheduler.advance(10.0));
    }
}

use std::time::{Duration, Instant};
use thiserror::Error;

/// Default wall-clock budget for one pipeline call.
pub const DEFAULT_BUDGET: Duration = Duration::from_millis(2_000);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("deadline of {budget:?} exceeded after {elapsed:?}")]
pub struct DeadlineExceeded {
    pub elapsed: Duration,
    pub budget: Duration,
}

/// Wall-clock budget started once at guard entry and threaded through every
/// later stage.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    pub fn unlimited() -> Self {
        Self::start(Duration::MAX)
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed())
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed() >= self.budget
    }

    pub fn check(&self) -> Result<(), DeadlineExceeded> {
        let elapsed = self.elapsed();
        if elapsed >= self.budget {
            tracing::warn!(?elapsed, budget = ?self.budget, "deadline exceeded");
            Err(DeadlineExceeded {
                elapsed,
                budget: self.budget,
            })
        } else {
            Ok(())
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::start(DEFAULT_BUDGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_is_expired_immediately() {
        let d = Deadline::start(Duration::ZERO);
        assert!(d.is_expired());
        assert_eq!(d.remaining(), Duration::ZERO);
        let err = d.check().unwrap_err();
        assert_eq!(err.budget, Duration::ZERO);
    }

    #[test]
    fn unlimited_never_expires() {
        let d = Deadline::unlimited();
        assert!(d.check().is_ok());
        assert!(d.remaining() > Duration::from_secs(3600));
    }
}

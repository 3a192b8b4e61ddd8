//=========================================================================
// Sequencing Primitives
//=========================================================================
//
// Building blocks for cooperative, tick-driven sequences.
//
// A sequence is a plain state machine with a `step()` method called once
// per tick. It returns `Step::Pending` to be resumed on the next tick, or
// `Step::Complete` once it has nothing left to do. Nothing runs between
// ticks, so sequences can be tested by stepping simulated frames.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Step ================================================================

/// Result of advancing a sequence by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The sequence must be stepped again on the next tick.
    Pending,

    /// The sequence finished; further steps are no-ops.
    Complete,
}

impl Step {
    pub fn is_complete(self) -> bool {
        self == Step::Complete
    }
}

//=== RealTimeDelay =======================================================

/// Waits for a fixed amount of real (unscaled) time.
///
/// The delay only observes the deltas passed to [`RealTimeDelay::tick`],
/// so pausing simulated time does not hold it back as long as the caller
/// feeds it `FrameClock::real_delta()`.
#[derive(Debug, Clone)]
pub struct RealTimeDelay {
    remaining: Duration,
}

impl RealTimeDelay {
    pub fn new(duration: Duration) -> Self {
        Self { remaining: duration }
    }

    /// Consumes `real_delta` from the remaining time.
    pub fn tick(&mut self, real_delta: Duration) -> Step {
        self.remaining = self.remaining.saturating_sub(real_delta);

        if self.remaining.is_zero() {
            Step::Complete
        } else {
            Step::Pending
        }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_completes_once_duration_elapsed() {
        let mut delay = RealTimeDelay::new(Duration::from_millis(320));

        assert_eq!(delay.tick(Duration::from_millis(100)), Step::Pending);
        assert_eq!(delay.tick(Duration::from_millis(100)), Step::Pending);
        assert_eq!(delay.tick(Duration::from_millis(100)), Step::Pending);
        assert_eq!(delay.tick(Duration::from_millis(100)), Step::Complete);
        assert_eq!(delay.remaining(), Duration::ZERO);
    }

    #[test]
    fn zero_delay_completes_on_first_tick() {
        let mut delay = RealTimeDelay::new(Duration::ZERO);
        assert!(delay.tick(Duration::ZERO).is_complete());
    }

    #[test]
    fn delay_stays_complete() {
        let mut delay = RealTimeDelay::new(Duration::from_millis(10));
        assert!(delay.tick(Duration::from_millis(50)).is_complete());
        assert!(delay.tick(Duration::from_millis(1)).is_complete());
    }
}

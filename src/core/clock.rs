//=========================================================================
// Frame Clock
//=========================================================================
//
// Tracks real and scaled time for the logic thread.
//
// Architecture:
//   CoreSystemsOrchestrator ──advance(real_delta)──> FrameClock
//                                                      ├─ real time (never paused)
//                                                      └─ scaled time (× TimeScale)
//
//   ScreenCoordinator ──TimeScale::set()──> shared scale (0.0 = frozen)
//
// Sequences that must keep running while the simulation is paused
// (scene transitions) read `real_delta()`. Simulation code reads
// `scaled_delta()`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::shared::AtomicF32;

//=== TimeScale ===========================================================

/// Shared handle to the process-wide simulation time scale.
///
/// Cloning the handle shares the underlying value. `1.0` means simulated
/// time runs at real speed, `0.0` means simulated time is frozen.
#[derive(Debug, Clone)]
pub struct TimeScale {
    value: Arc<AtomicF32>,
}

impl TimeScale {
    /// Creates a time scale running at real speed.
    pub fn new() -> Self {
        Self {
            value: Arc::new(AtomicF32::new(1.0)),
        }
    }

    /// Returns the current scale factor.
    pub fn get(&self) -> f32 {
        self.value.load()
    }

    /// Sets the scale factor.
    ///
    /// # Panics
    ///
    /// Panics if `scale` is negative or not finite.
    pub fn set(&self, scale: f32) {
        assert!(
            scale.is_finite() && scale >= 0.0,
            "Time scale must be finite and non-negative, got {}",
            scale
        );
        self.value.store(scale);
    }

    /// Returns true if simulated time is frozen.
    pub fn is_frozen(&self) -> bool {
        self.get() == 0.0
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

//=== FrameClock ==========================================================

/// Per-tick time bookkeeping.
pub struct FrameClock {
    time_scale: TimeScale,
    real_delta: Duration,
    scaled_delta: Duration,
    real_elapsed: Duration,
    scaled_elapsed: Duration,
    frame: u64,
}

impl FrameClock {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::with_time_scale(TimeScale::new())
    }

    /// Creates a clock driven by an existing time scale handle.
    pub fn with_time_scale(time_scale: TimeScale) -> Self {
        Self {
            time_scale,
            real_delta: Duration::ZERO,
            scaled_delta: Duration::ZERO,
            real_elapsed: Duration::ZERO,
            scaled_elapsed: Duration::ZERO,
            frame: 0,
        }
    }

    //--- Advancing --------------------------------------------------------

    /// Records one tick of `real_delta` wall-clock time.
    ///
    /// Elapsed totals saturate at `Duration::MAX`.
    pub fn advance(&mut self, real_delta: Duration) {
        self.real_delta = real_delta;
        self.scaled_delta = scale_delta(real_delta, self.time_scale.get());
        self.real_elapsed = self.real_elapsed.saturating_add(real_delta);
        self.scaled_elapsed = self.scaled_elapsed.saturating_add(self.scaled_delta);
        self.frame += 1;
    }

    //--- Queries ----------------------------------------------------------

    /// Returns a handle to the scale applied to simulated time.
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale.clone()
    }

    /// Real time covered by the last tick, unaffected by pause.
    pub fn real_delta(&self) -> Duration {
        self.real_delta
    }

    /// Simulated time covered by the last tick.
    pub fn scaled_delta(&self) -> Duration {
        self.scaled_delta
    }

    pub fn real_elapsed(&self) -> Duration {
        self.real_elapsed
    }

    pub fn scaled_elapsed(&self) -> Duration {
        self.scaled_elapsed
    }

    /// Number of ticks recorded so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.time_scale.is_frozen()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies `scale` to `real_delta`. Unit and zero scales are exact; other
/// scales go through `f64` and saturate instead of overflowing.
fn scale_delta(real_delta: Duration, scale: f32) -> Duration {
    if scale == 1.0 {
        real_delta
    } else if scale == 0.0 {
        Duration::ZERO
    } else {
        Duration::try_from_secs_f64(real_delta.as_secs_f64() * f64::from(scale))
            .unwrap_or(Duration::MAX)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_is_running_at_frame_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_paused());
        assert_eq!(clock.real_elapsed(), Duration::ZERO);
    }

    #[test]
    fn advance_accumulates_real_and_scaled_time() {
        let mut clock = FrameClock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(16));

        assert_eq!(clock.frame(), 2);
        assert_eq!(clock.real_elapsed(), Duration::from_millis(32));
        assert_eq!(clock.scaled_elapsed(), Duration::from_millis(32));
    }

    #[test]
    fn scaled_time_tracks_real_time_at_unit_scale() {
        let mut clock = FrameClock::new();
        for _ in 0..1000 {
            clock.advance(Duration::from_millis(16));
        }

        assert_eq!(clock.real_elapsed(), Duration::from_secs(16));
        assert_eq!(clock.scaled_elapsed(), clock.real_elapsed());
    }

    #[test]
    fn fractional_scale_is_applied() {
        let mut clock = FrameClock::new();
        clock.time_scale().set(0.5);
        clock.advance(Duration::from_millis(100));

        assert_eq!(clock.scaled_delta(), Duration::from_millis(50));
        assert_eq!(clock.real_delta(), Duration::from_millis(100));
    }

    #[test]
    fn huge_time_scale_saturates_instead_of_panicking() {
        let mut clock = FrameClock::new();
        clock.time_scale().set(1.0e30);

        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.scaled_delta(), Duration::MAX);

        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.scaled_elapsed(), Duration::MAX);
        assert_eq!(clock.real_elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn frozen_scale_stops_scaled_time_only() {
        let mut clock = FrameClock::new();
        clock.time_scale().set(0.0);
        clock.advance(Duration::from_millis(100));

        assert!(clock.is_paused());
        assert_eq!(clock.real_delta(), Duration::from_millis(100));
        assert_eq!(clock.scaled_delta(), Duration::ZERO);
        assert_eq!(clock.scaled_elapsed(), Duration::ZERO);
    }

    #[test]
    fn time_scale_handles_share_value() {
        let scale = TimeScale::new();
        let clock = FrameClock::with_time_scale(scale.clone());

        scale.set(0.0);
        assert!(clock.is_paused());

        clock.time_scale().set(1.0);
        assert!(!scale.is_frozen());
    }

    #[test]
    #[should_panic(expected = "Time scale must be finite and non-negative")]
    fn negative_time_scale_panics() {
        TimeScale::new().set(-1.0);
    }
}

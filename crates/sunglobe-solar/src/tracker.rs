//! Sun tracking: one recompute path for both update triggers.
//!
//! The periodic tick and the orbit controls' rotation-change event both end
//! in [`SunTracker::recompute`], which evaluates the sun position for the
//! current instant, folds in the latest globe azimuth, and hands the result
//! to an [`IlluminationSink`]. Recomputation is O(1), so nothing is
//! coalesced and the last write wins.

use std::cell::Cell;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::illumination::IlluminationState;
use crate::position::{SunEstimator, SunPosition};

/// Default interval between periodic refreshes.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

/// Source of wall-clock time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The host's wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually driven clock.
#[derive(Clone, Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock frozen at `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(instant),
        }
    }

    /// Move the clock forward by `step`.
    pub fn advance(&self, step: chrono::TimeDelta) {
        self.now.set(self.now.get() + step);
    }

    /// Jump to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.now.set(instant);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Receiver of recomputed illumination, typically the globe material.
pub trait IlluminationSink {
    /// Replace the material's sun uniforms with `state`.
    fn apply(&mut self, state: IlluminationState);
}

impl<F: FnMut(IlluminationState)> IlluminationSink for F {
    fn apply(&mut self, state: IlluminationState) {
        self(state)
    }
}

/// Why the illumination is being recomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateTrigger {
    /// The periodic refresh interval elapsed.
    Tick,
    /// The viewer rotated the globe to a new azimuth (radians).
    RotationChanged {
        /// New yaw of the orbit controls.
        azimuth: f64,
    },
}

/// Tracks the latest globe azimuth and the periodic refresh schedule.
#[derive(Clone, Debug)]
pub struct SunTracker {
    estimator: SunEstimator,
    interval: Duration,
    azimuth: f64,
    last_tick: Option<DateTime<Utc>>,
    last_sun: Option<SunPosition>,
    last_state: Option<IlluminationState>,
    update_count: u64,
}

impl SunTracker {
    /// Create a tracker refreshing every `interval`.
    pub fn new(estimator: SunEstimator, interval: Duration) -> Self {
        Self {
            estimator,
            interval,
            azimuth: 0.0,
            last_tick: None,
            last_sun: None,
            last_state: None,
            update_count: 0,
        }
    }

    /// Recompute illumination for `now` and push it to `sink`.
    pub fn recompute(
        &mut self,
        trigger: UpdateTrigger,
        now: DateTime<Utc>,
        sink: &mut impl IlluminationSink,
    ) -> IlluminationState {
        match trigger {
            UpdateTrigger::Tick => self.last_tick = Some(now),
            UpdateTrigger::RotationChanged { azimuth } => self.azimuth = azimuth,
        }

        let sun = self.estimator.compute(now);
        let state = IlluminationState::from_sun(sun, self.azimuth);
        trace!(?trigger, %sun, sun_angle = state.sun_angle, "illumination recomputed");

        self.last_sun = Some(sun);
        self.last_state = Some(state);
        self.update_count += 1;
        sink.apply(state);
        state
    }

    /// Fire a [`UpdateTrigger::Tick`] if the refresh interval has elapsed.
    ///
    /// The first poll always fires.
    pub fn poll(
        &mut self,
        now: DateTime<Utc>,
        sink: &mut impl IlluminationSink,
    ) -> Option<IlluminationState> {
        if !self.is_due(now) {
            return None;
        }
        debug!(at = %now, "periodic sun refresh");
        Some(self.recompute(UpdateTrigger::Tick, now, sink))
    }

    /// Whether a periodic refresh is due at `now`.
    ///
    /// A clock that stepped backwards past the last tick counts as due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_tick {
            None => true,
            Some(last) => (now - last)
                .to_std()
                .map_or(true, |elapsed| elapsed >= self.interval),
        }
    }

    /// Time remaining until the next periodic refresh.
    pub fn time_until_due(&self, now: DateTime<Utc>) -> Duration {
        match self.last_tick {
            None => Duration::ZERO,
            Some(last) => match (now - last).to_std() {
                Ok(elapsed) => self.interval.saturating_sub(elapsed),
                Err(_) => Duration::ZERO,
            },
        }
    }

    /// Current globe azimuth in radians.
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// The refresh interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The sun position from the most recent recompute.
    pub fn last_sun(&self) -> Option<SunPosition> {
        self.last_sun
    }

    /// The state from the most recent recompute.
    pub fn last_state(&self) -> Option<IlluminationState> {
        self.last_state
    }

    /// Number of recomputes performed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}

impl Default for SunTracker {
    fn default() -> Self {
        Self::new(SunEstimator::default(), DEFAULT_UPDATE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn discard() -> impl FnMut(IlluminationState) {
        |_| {}
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_first_poll_fires() {
        let mut tracker = SunTracker::default();
        let mut applied = Vec::new();
        let state = tracker.poll(noon(), &mut |s: IlluminationState| applied.push(s));
        assert!(state.is_some());
        assert_eq!(applied.len(), 1);
    }

    #[test]
    fn test_poll_waits_for_interval() {
        let clock = FixedClock::new(noon());
        let mut tracker = SunTracker::default();
        let mut applied = 0;
        let mut sink = |_: IlluminationState| applied += 1;

        tracker.poll(clock.now(), &mut sink);
        clock.advance(TimeDelta::seconds(59));
        assert!(tracker.poll(clock.now(), &mut sink).is_none());
        clock.advance(TimeDelta::seconds(1));
        assert!(tracker.poll(clock.now(), &mut sink).is_some());
        assert_eq!(applied, 2);
    }

    #[test]
    fn test_time_until_due() {
        let mut tracker = SunTracker::default();
        assert_eq!(tracker.time_until_due(noon()), Duration::ZERO);
        tracker.poll(noon(), &mut discard());
        let later = noon() + TimeDelta::seconds(45);
        assert_eq!(tracker.time_until_due(later), Duration::from_secs(15));
    }

    #[test]
    fn test_backwards_clock_is_due() {
        let mut tracker = SunTracker::default();
        tracker.poll(noon(), &mut discard());
        assert!(tracker.is_due(noon() - TimeDelta::seconds(5)));
    }

    #[test]
    fn test_rotation_change_keeps_schedule() {
        let mut tracker = SunTracker::default();
        tracker.poll(noon(), &mut discard());
        let later = noon() + TimeDelta::seconds(30);
        tracker.recompute(
            UpdateTrigger::RotationChanged { azimuth: 1.0 },
            later,
            &mut discard(),
        );
        assert_eq!(tracker.azimuth(), 1.0);
        assert_eq!(tracker.time_until_due(later), Duration::from_secs(30));
    }

    #[test]
    fn test_both_triggers_converge() {
        let mut a = SunTracker::default();
        let mut b = SunTracker::default();
        let now = noon();

        a.recompute(UpdateTrigger::RotationChanged { azimuth: 0.7 }, now, &mut discard());
        let from_tick = a.recompute(UpdateTrigger::Tick, now, &mut discard());
        let from_rotation =
            b.recompute(UpdateTrigger::RotationChanged { azimuth: 0.7 }, now, &mut discard());

        assert_eq!(from_tick, from_rotation);
    }

    #[test]
    fn test_rotation_shifts_angle_by_azimuth() {
        let mut tracker = SunTracker::default();
        let base = tracker.recompute(UpdateTrigger::Tick, noon(), &mut discard());
        let spun = tracker.recompute(
            UpdateTrigger::RotationChanged { azimuth: 0.4 },
            noon(),
            &mut discard(),
        );
        assert!((spun.sun_angle - base.sun_angle - 0.4).abs() < 1e-12);
        assert_eq!(spun.sun_latitude, base.sun_latitude);
        assert_eq!(tracker.update_count(), 2);
    }

    #[test]
    fn test_last_state_recorded() {
        let mut tracker = SunTracker::default();
        assert!(tracker.last_state().is_none());
        let state = tracker.recompute(UpdateTrigger::Tick, noon(), &mut discard());
        assert_eq!(tracker.last_state(), Some(state));
        assert!(tracker.last_sun().is_some());
    }
}

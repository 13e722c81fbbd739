//! Spin animation state machine.
//!
//! `Idle → Spinning → Idle`, driven by elapsed-time deltas so the frame loop
//! and the tests use the same entry point. The machine only produces the
//! raw animated rotation; normalizing, snapping, and committing the draw
//! happen in the engine when [`SpinState::advance`] reports `Finished`.

use std::f64::consts::TAU;
use std::time::Duration;

use rand::Rng;

/// Full-turn range per spin: 5 to 10 turns, plus a uniform resting angle
/// on top.
const MIN_TURNS: f64 = 5.0;
const TURN_SPREAD: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub enum SpinState {
    Idle,
    Spinning {
        /// Rotation when the spin started.
        start: f64,
        /// Total rotation to add over the full animation.
        total: f64,
        elapsed: Duration,
        duration: Duration,
    },
}

/// What one animation step produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinProgress {
    /// Not spinning; nothing changed.
    Idle,
    /// Mid-animation; the new rotation to render.
    Animating(f64),
    /// Animation ran to completion; the final raw (unnormalized) rotation.
    Finished(f64),
}

impl Default for SpinState {
    fn default() -> Self {
        Self::Idle
    }
}

impl SpinState {
    /// Start a spin from `start_rotation`. The target is 5–10 full turns
    /// plus a uniform resting angle.
    pub fn begin(start_rotation: f64, duration: Duration, rng: &mut impl Rng) -> Self {
        let turns = MIN_TURNS + rng.gen::<f64>() * TURN_SPREAD;
        let resting = rng.gen::<f64>() * TAU;
        let total = turns * TAU + resting;
        tracing::debug!(turns, resting, "spin started");
        Self::Spinning {
            start: start_rotation,
            total,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self, Self::Spinning { .. })
    }

    /// Advance the animation by `dt`. Progress is clamped to 100%; once the
    /// fixed duration has elapsed the state returns to `Idle` and the final
    /// rotation is handed back exactly once.
    pub fn advance(&mut self, dt: Duration) -> SpinProgress {
        let Self::Spinning {
            start,
            total,
            elapsed,
            duration,
        } = self
        else {
            return SpinProgress::Idle;
        };

        *elapsed += dt;
        let fraction = if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
        };
        let rotation = *start + *total * ease_out_cubic(fraction);

        if fraction >= 1.0 {
            *self = Self::Idle;
            SpinProgress::Finished(rotation)
        } else {
            SpinProgress::Animating(rotation)
        }
    }
}

/// Cubic ease-out: fast start, settling finish.
fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_idle_advances_to_idle() {
        let mut state = SpinState::Idle;
        assert_eq!(
            state.advance(Duration::from_millis(16)),
            SpinProgress::Idle
        );
    }

    #[test]
    fn test_total_rotation_within_expected_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let state = SpinState::begin(0.0, Duration::from_secs(1), &mut rng);
            let SpinState::Spinning { total, .. } = state else {
                panic!("begin() must enter Spinning");
            };
            // 5 full turns minimum; strictly under 11 (10 turns + resting).
            assert!(total >= MIN_TURNS * TAU);
            assert!(total < (MIN_TURNS + TURN_SPREAD + 1.0) * TAU);
        }
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = SpinState::begin(1.0, Duration::from_secs(1), &mut rng);
        let mut last = 1.0;
        for _ in 0..59 {
            match state.advance(Duration::from_millis(16)) {
                SpinProgress::Animating(r) => {
                    assert!(r >= last, "rotation went backwards");
                    last = r;
                }
                other => panic!("unexpected progress before completion: {:?}", other),
            }
        }
    }

    #[test]
    fn test_finishes_exactly_once_at_duration() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = SpinState::begin(0.5, Duration::from_millis(1000), &mut rng);
        let SpinState::Spinning { total, .. } = state.clone() else {
            unreachable!();
        };

        assert!(matches!(
            state.advance(Duration::from_millis(999)),
            SpinProgress::Animating(_)
        ));
        match state.advance(Duration::from_millis(1)) {
            SpinProgress::Finished(rotation) => {
                // Eased fraction is exactly 1.0 at the end, so the full
                // target rotation is reached.
                assert!((rotation - (0.5 + total)).abs() < 1e-9);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(state, SpinState::Idle);
        assert_eq!(state.advance(Duration::from_millis(16)), SpinProgress::Idle);
    }

    #[test]
    fn test_overshooting_tick_clamps_to_completion() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = SpinState::begin(0.0, Duration::from_secs(1), &mut rng);
        assert!(matches!(
            state.advance(Duration::from_secs(10)),
            SpinProgress::Finished(_)
        ));
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}

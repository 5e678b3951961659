//! Periodic phase patterns for legged locomotion.
//!
//! A gait is one cycle of contact phases. Unrolling it over several cycles gives a
//! [`PhaseSequence`] in which every repetition of a phase shares the same payload.
//! Presets describe quadruped contact schedules with feet ordered FL, FR, RL, RR.

use std::sync::Arc;

use tracing::debug;

use crate::phase_error::PhaseError;
use crate::phase_sequence::PhaseSequence;
use crate::time::SwitchTime;

/// Stance flags of a quadruped, one per foot in FL, FR, RL, RR order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMode {
    pub name: &'static str,
    pub stance: [bool; 4],
}

impl ContactMode {
    pub fn feet_in_stance(&self) -> usize {
        self.stance.iter().filter(|&&c| c).count()
    }
}

/// One cycle of a periodic phase schedule.
#[derive(Debug)]
pub struct GaitPattern<P, T> {
    steps: Vec<(Arc<P>, T)>,
}

impl<P, T: SwitchTime> GaitPattern<P, T> {
    /// Build a pattern from `(phase, duration)` steps. Durations must be non-negative.
    pub fn new(steps: Vec<(Arc<P>, T)>) -> Result<Self, PhaseError> {
        if let Some((_, bad)) = steps.iter().find(|(_, d)| !(*d >= T::zero())) {
            return Err(PhaseError::InvalidArgument(format!(
                "gait step duration must be non-negative (got {:?})",
                bad
            )));
        }
        Ok(GaitPattern { steps })
    }

    pub fn steps(&self) -> &[(Arc<P>, T)] {
        &self.steps
    }

    /// Duration of one cycle.
    pub fn period(&self) -> T {
        self.steps.iter().fold(T::zero(), |acc, (_, d)| acc + *d)
    }

    /// Repeat the pattern `cycles` times starting at `start_time`.
    pub fn unroll(&self, start_time: T, cycles: usize) -> Result<PhaseSequence<P, T>, PhaseError> {
        let mut sequence = PhaseSequence::new(start_time);
        for _ in 0..cycles {
            for (phase, duration) in &self.steps {
                sequence.add_phase(phase.clone(), *duration)?;
            }
        }
        debug!(
            "unrolled {} cycles into {} phases ending at {:?}",
            cycles,
            sequence.num_phases(),
            sequence.end_time()
        );
        Ok(sequence)
    }
}

fn check_cycle(cycle_time: f64) -> Result<(), PhaseError> {
    if !(cycle_time > 0.0) || !cycle_time.is_finite() {
        return Err(PhaseError::InvalidArgument(format!(
            "gait cycle time must be positive and finite (got {})",
            cycle_time
        )));
    }
    Ok(())
}

/// Split `cycle_time` evenly over the given modes.
fn even_pattern(cycle_time: f64, modes: Vec<ContactMode>) -> Result<GaitPattern<ContactMode, f64>, PhaseError> {
    check_cycle(cycle_time)?;
    let duration = cycle_time / modes.len() as f64;
    GaitPattern::new(modes.into_iter().map(|m| (Arc::new(m), duration)).collect())
}

/// All feet on the ground for the whole cycle.
pub fn stand(cycle_time: f64) -> Result<GaitPattern<ContactMode, f64>, PhaseError> {
    even_pattern(cycle_time, vec![ContactMode { name: "stand", stance: [true; 4] }])
}

/// Diagonal pairs alternate: FL+RR, then FR+RL.
pub fn trot(cycle_time: f64) -> Result<GaitPattern<ContactMode, f64>, PhaseError> {
    even_pattern(
        cycle_time,
        vec![
            ContactMode { name: "trot_fl_rr", stance: [true, false, false, true] },
            ContactMode { name: "trot_fr_rl", stance: [false, true, true, false] },
        ],
    )
}

/// Front pair, then rear pair.
pub fn bound(cycle_time: f64) -> Result<GaitPattern<ContactMode, f64>, PhaseError> {
    even_pattern(
        cycle_time,
        vec![
            ContactMode { name: "bound_front", stance: [true, true, false, false] },
            ContactMode { name: "bound_rear", stance: [false, false, true, true] },
        ],
    )
}

/// One foot swings at a time, in FL, RR, FR, RL order.
pub fn walk(cycle_time: f64) -> Result<GaitPattern<ContactMode, f64>, PhaseError> {
    even_pattern(
        cycle_time,
        vec![
            ContactMode { name: "walk_swing_fl", stance: [false, true, true, true] },
            ContactMode { name: "walk_swing_rr", stance: [true, true, true, false] },
            ContactMode { name: "walk_swing_fr", stance: [true, false, true, true] },
            ContactMode { name: "walk_swing_rl", stance: [true, true, false, true] },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period() {
        let pattern = GaitPattern::new(vec![(Arc::new('a'), 3), (Arc::new('b'), 4)]).unwrap();
        assert_eq!(pattern.period(), 7);
        assert_eq!(pattern.steps().len(), 2);
    }

    #[test]
    fn test_negative_step_rejected() {
        let result = GaitPattern::new(vec![(Arc::new('a'), 0.1), (Arc::new('b'), -0.1)]);
        assert!(matches!(result, Err(PhaseError::InvalidArgument(_))));
    }

    #[test]
    fn test_bad_cycle_time() {
        assert!(trot(0.0).is_err());
        assert!(walk(-1.0).is_err());
        assert!(stand(f64::INFINITY).is_err());
        assert!(bound(f64::NAN).is_err());
    }

    #[test]
    fn test_unroll_zero_cycles() {
        let sequence = trot(0.4).unwrap().unroll(1.0, 0).unwrap();
        assert!(sequence.is_empty());
        assert_eq!(sequence.start_time(), 1.0);
    }
}

//! Phase sequences with switching events
//!
//! A phase sequence maps a time axis onto an ordered list of phases (modes). The
//! following illustrates a sequence of 3 phases:
//!
//! ```text
//! + ------- + ------- + ------- +
//! t0   p0   t1   p1   t2   p2   t3
//! ```
//!
//! It is defined by 4 boundary times, two of which (t1 and t2) are switching times.
//! There are two switching events: `{p0, p1, t1}` and `{p1, p2, t2}`.
//!
//! Phases are shared [`Arc`] handles. The sequence never inspects them, and the same
//! handle may appear many times (a repeated gait mode, for instance).
//!
//! ```
//! use std::sync::Arc;
//! use rs_phase_schedule::phase_sequence::PhaseSequence;
//!
//! let stance = Arc::new("stance");
//! let swing = Arc::new("swing");
//!
//! let mut sequence = PhaseSequence::new(0.0);
//! sequence.add_phase(stance.clone(), 2.0).unwrap();
//! sequence.add_phase(swing.clone(), 3.0).unwrap();
//!
//! assert_eq!(sequence.boundaries(), &[0.0, 2.0, 5.0]);
//! assert!(Arc::ptr_eq(&sequence.phase_from_time(1.0).unwrap(), &stance));
//! assert_eq!(sequence.switch_event_from_idx(0).unwrap().switch_time, 2.0);
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use crate::phase_error::PhaseError;
use crate::policies::{BoundaryPolicy, OutOfRangePolicy};
use crate::time::SwitchTime;

/// Collection of per-mode subsystems (dynamics models, controllers) indexed by the
/// mode numbers of a [`ContinuousModeSequence`] or [`DiscreteModeSequence`].
pub type Switched<S> = Vec<S>;

/// Describes a switch between two adjacent phases.
#[derive(Debug, PartialEq)]
pub struct SwitchEvent<P, T> {
    pub pre_phase: Arc<P>,
    pub post_phase: Arc<P>,
    pub switch_time: T,
}

impl<P, T: Copy> Clone for SwitchEvent<P, T> {
    fn clone(&self) -> Self {
        SwitchEvent {
            pre_phase: self.pre_phase.clone(),
            post_phase: self.post_phase.clone(),
            switch_time: self.switch_time,
        }
    }
}

/// Ordered, append-only sequence of phases with their boundary times.
///
/// Holds `num_phases() + 1` boundaries. An empty sequence has only the start time.
/// Appending takes `&mut self` and every query takes `&self`, so a sequence is built
/// first and then shared read-only (it is `Send + Sync` when `P` is).
#[derive(Debug)]
pub struct PhaseSequence<P, T> {
    phases: Vec<Arc<P>>,
    boundaries: Vec<T>,
    boundary_policy: BoundaryPolicy,
    out_of_range: OutOfRangePolicy,
}

/// Mode sequence over continuous time, phases are mode indices.
pub type ContinuousModeSequence = PhaseSequence<usize, f64>;

/// Mode sequence over discrete time steps, phases are mode indices.
pub type DiscreteModeSequence = PhaseSequence<usize, i32>;

impl<P, T: Copy> Clone for PhaseSequence<P, T> {
    fn clone(&self) -> Self {
        PhaseSequence {
            phases: self.phases.clone(),
            boundaries: self.boundaries.clone(),
            boundary_policy: self.boundary_policy,
            out_of_range: self.out_of_range,
        }
    }
}

impl<P, T: SwitchTime> Default for PhaseSequence<P, T> {
    fn default() -> Self {
        Self::new(T::zero())
    }
}

impl<P, T: SwitchTime> PhaseSequence<P, T> {
    /// Construct an empty sequence starting at `start_time`, with default policies.
    pub fn new(start_time: T) -> Self {
        PhaseSequence {
            phases: Vec::new(),
            boundaries: vec![start_time],
            boundary_policy: BoundaryPolicy::default(),
            out_of_range: OutOfRangePolicy::default(),
        }
    }

    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary_policy = policy;
        self
    }

    pub fn with_out_of_range_policy(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.boundary_policy
    }

    pub fn out_of_range_policy(&self) -> OutOfRangePolicy {
        self.out_of_range
    }

    /// Append a phase lasting `duration`. Zero duration is allowed and creates an
    /// instantaneous phase. Negative or NaN durations are rejected and leave the
    /// sequence unchanged.
    ///
    /// The new boundary `end_time() + duration` is computed with the `+` of `T`. For
    /// integer times it is not checked for overflow, which panics in debug builds and
    /// wraps in release builds; keep discrete schedules within the range of `T`.
    pub fn add_phase(&mut self, phase: Arc<P>, duration: T) -> Result<(), PhaseError> {
        if !(duration >= T::zero()) {
            return Err(PhaseError::InvalidArgument(format!(
                "phase duration must be non-negative (got {:?})",
                duration
            )));
        }
        let start = self.end_time();
        self.phases.push(phase);
        self.boundaries.push(start + duration);
        debug!(
            "phase {} added: start={start:?} duration={duration:?}",
            self.phases.len() - 1
        );
        Ok(())
    }

    pub fn num_phases(&self) -> usize {
        self.phases.len()
    }

    /// Number of switching events, zero for both empty and single phase sequences.
    pub fn num_switches(&self) -> usize {
        self.num_phases().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// The configured start time, `t[0]`.
    pub fn start_time(&self) -> T {
        self.boundaries[0]
    }

    /// The last boundary, `t[N]`. Equals the start time while the sequence is empty.
    pub fn end_time(&self) -> T {
        self.boundaries[self.boundaries.len() - 1]
    }

    pub fn total_duration(&self) -> T {
        self.end_time() - self.start_time()
    }

    /// All boundary times, `num_phases() + 1` values in non-decreasing order.
    pub fn boundaries(&self) -> &[T] {
        &self.boundaries
    }

    pub fn phases(&self) -> impl Iterator<Item = &Arc<P>> {
        self.phases.iter()
    }

    /// All switching events in time order.
    pub fn switch_events(&self) -> impl Iterator<Item = SwitchEvent<P, T>> + '_ {
        self.phases
            .windows(2)
            .zip(&self.boundaries[1..])
            .map(|(pair, &switch_time)| SwitchEvent {
                pre_phase: pair[0].clone(),
                post_phase: pair[1].clone(),
                switch_time,
            })
    }

    pub fn start_time_from_idx(&self, idx: usize) -> Result<T, PhaseError> {
        self.check_phase_idx(idx)?;
        Ok(self.boundaries[idx])
    }

    pub fn end_time_from_idx(&self, idx: usize) -> Result<T, PhaseError> {
        self.check_phase_idx(idx)?;
        Ok(self.boundaries[idx + 1])
    }

    pub fn duration_from_idx(&self, idx: usize) -> Result<T, PhaseError> {
        self.check_phase_idx(idx)?;
        Ok(self.boundaries[idx + 1] - self.boundaries[idx])
    }

    pub fn phase_from_idx(&self, idx: usize) -> Result<Arc<P>, PhaseError> {
        self.check_phase_idx(idx)?;
        Ok(self.phases[idx].clone())
    }

    /// Index of the phase active at `time`, in O(log N).
    ///
    /// Boundary times are resolved by the [`BoundaryPolicy`], times outside
    /// `[start_time(), end_time()]` by the [`OutOfRangePolicy`].
    pub fn idx_from_time(&self, time: T) -> Result<usize, PhaseError> {
        if self.is_empty() {
            return Err(PhaseError::EmptySequence);
        }
        if !time.is_comparable() {
            return Err(PhaseError::InvalidArgument(format!(
                "time {:?} cannot be ordered",
                time
            )));
        }

        let last = self.num_phases() - 1;
        let (start, end) = (self.start_time(), self.end_time());
        if time < start || time > end {
            return match self.out_of_range {
                OutOfRangePolicy::Reject => Err(PhaseError::TimeOutOfRange {
                    time: time.as_f64(),
                    start: start.as_f64(),
                    end: end.as_f64(),
                }),
                OutOfRangePolicy::Clamp => {
                    let idx = if time < start { 0 } else { last };
                    warn!("time {time:?} outside [{start:?}, {end:?}], clamped to phase {idx}");
                    Ok(idx)
                }
            };
        }

        let idx = match self.boundary_policy {
            BoundaryPolicy::StartInclusive => {
                // First boundary after time; time >= t[0] so this is at least 1
                let upper = self.boundaries.partition_point(|b| *b <= time);
                (upper - 1).min(last)
            }
            BoundaryPolicy::EndInclusive => {
                // First boundary not less than time
                let lower = self.boundaries.partition_point(|b| *b < time);
                lower.max(1) - 1
            }
        };
        Ok(idx)
    }

    pub fn phase_from_time(&self, time: T) -> Result<Arc<P>, PhaseError> {
        self.phase_from_idx(self.idx_from_time(time)?)
    }

    /// Switch from phase `idx` to phase `idx + 1`.
    pub fn switch_event_from_idx(&self, idx: usize) -> Result<SwitchEvent<P, T>, PhaseError> {
        if self.is_empty() {
            return Err(PhaseError::EmptySequence);
        }
        if idx >= self.num_switches() {
            return Err(PhaseError::IndexOutOfRange {
                idx,
                len: self.num_switches(),
            });
        }
        Ok(SwitchEvent {
            pre_phase: self.phases[idx].clone(),
            post_phase: self.phases[idx + 1].clone(),
            switch_time: self.boundaries[idx + 1],
        })
    }

    /// Next switch after the phase active at `time`. Fails with `IndexOutOfRange` when
    /// `time` is in the last phase.
    pub fn switch_event_from_time(&self, time: T) -> Result<SwitchEvent<P, T>, PhaseError> {
        self.switch_event_from_idx(self.idx_from_time(time)?)
    }

    fn check_phase_idx(&self, idx: usize) -> Result<(), PhaseError> {
        if self.is_empty() {
            return Err(PhaseError::EmptySequence);
        }
        if idx >= self.num_phases() {
            return Err(PhaseError::IndexOutOfRange {
                idx,
                len: self.num_phases(),
            });
        }
        Ok(())
    }
}

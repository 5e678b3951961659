//! Phase sequences and switching events for hybrid dynamical systems
//!
//! A hybrid trajectory optimizer, gait controller or any other mode-switched system needs
//! to know which mode (phase) is active at a given time, and when and between which modes
//! the next switch happens. This crate provides that bookkeeping.
//!
//! # Features
//!
//! - [`phase_sequence::PhaseSequence`] maps a time axis (continuous or discrete) onto an
//!   ordered list of shared phase payloads, with O(log N) lookup of the active phase.
//! - Switching events (outgoing phase, incoming phase, switching time) are derived from the
//!   sequence, never stored.
//! - Every query is bounds checked. Out-of-range indices and times are reported as
//!   [`phase_error::PhaseError`] values, or times can be clamped to the nearest phase.
//! - A switching time belongs to the phase starting there by default; this can be changed
//!   to the phase ending there with [`policies::BoundaryPolicy::EndInclusive`].
//! - Zero duration phases are allowed. They are never active at internal boundaries, but
//!   take part in switching. An instantaneous phase at either end of the sequence is
//!   selected at `t[N]` (start inclusive) or `t[0]` (end inclusive).
//! - Periodic gait patterns with quadruped presets (stand, trot, bound, walk) unroll into
//!   sequences whose repeated phases share one payload.
//! - Schedules can be read from YAML (feature `allow_filesystem`, enabled by default).
//!
//! The same payload may appear at any number of places in a sequence:
//!
//! ```
//! use std::sync::Arc;
//! use rs_phase_schedule::phase_sequence::ContinuousModeSequence;
//!
//! let mut sequence = ContinuousModeSequence::new(0.0);
//! let (stance, flight) = (Arc::new(0), Arc::new(1));
//! for _ in 0..2 {
//!     sequence.add_phase(stance.clone(), 0.3).unwrap();
//!     sequence.add_phase(flight.clone(), 0.1).unwrap();
//! }
//! assert_eq!(sequence.num_switches(), 3);
//! assert_eq!(*sequence.phase_from_time(0.35).unwrap(), 1);
//! ```

pub mod time;
pub mod policies;
pub mod phase_error;
pub mod phase_sequence;

pub mod gait;

#[path = "utils/utils.rs"]
pub mod utils;

#[cfg(feature = "allow_filesystem")]
pub mod schedule_error;
#[cfg(feature = "allow_filesystem")]
pub mod schedule_from_file;

#[cfg(test)]
#[cfg(feature = "allow_filesystem")]
mod tests;

//! Error handling for phase sequences

/// Errors reported by [`crate::phase_sequence::PhaseSequence`] queries and appends.
///
/// Times are reported as `f64` regardless of the time type of the sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseError {
    InvalidArgument(String),
    IndexOutOfRange { idx: usize, len: usize },
    EmptySequence,
    TimeOutOfRange { time: f64, start: f64, end: f64 },
}

impl std::fmt::Display for PhaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            PhaseError::InvalidArgument(ref msg) =>
                write!(f, "Invalid Argument: {}", msg),
            PhaseError::IndexOutOfRange { idx, len } =>
                write!(f, "Index Out Of Range: index {} is not below {}", idx, len),
            PhaseError::EmptySequence =>
                write!(f, "Empty Sequence: no phase has been added yet"),
            PhaseError::TimeOutOfRange { time, start, end } =>
                write!(f, "Time Out Of Range: {} is outside [{}, {}]", time, start, end),
        }
    }
}

impl std::error::Error for PhaseError {}

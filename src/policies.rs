//! Lookup policies of a phase sequence

/// Which phase owns a time that falls exactly on a boundary between two phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Phase `i` owns `[t[i], t[i+1])`; the final boundary belongs to the last phase.
    /// A switching time selects the phase that starts there, so instantaneous phases are
    /// skipped, except a trailing one, which owns `t[N]`.
    #[default]
    StartInclusive,

    /// Phase `i` owns `(t[i], t[i+1]]`; the start time belongs to the first phase.
    /// A switching time selects the phase that ends there (lower bound search). A leading
    /// instantaneous phase owns `t[0]`.
    EndInclusive,
}

/// What a time lookup does when the time is before the start or after the end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRangePolicy {
    /// Report [`crate::phase_error::PhaseError::TimeOutOfRange`].
    #[default]
    Reject,

    /// Use the first phase before the start and the last phase after the end.
    Clamp,
}

impl BoundaryPolicy {
    /// Name as used in schedule files.
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryPolicy::StartInclusive => "start_inclusive",
            BoundaryPolicy::EndInclusive => "end_inclusive",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start_inclusive" => Some(BoundaryPolicy::StartInclusive),
            "end_inclusive" => Some(BoundaryPolicy::EndInclusive),
            _ => None,
        }
    }
}

impl OutOfRangePolicy {
    /// Name as used in schedule files.
    pub fn name(&self) -> &'static str {
        match self {
            OutOfRangePolicy::Reject => "reject",
            OutOfRangePolicy::Clamp => "clamp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "reject" => Some(OutOfRangePolicy::Reject),
            "clamp" => Some(OutOfRangePolicy::Clamp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for policy in [BoundaryPolicy::StartInclusive, BoundaryPolicy::EndInclusive] {
            assert_eq!(BoundaryPolicy::from_name(policy.name()), Some(policy));
        }
        for policy in [OutOfRangePolicy::Reject, OutOfRangePolicy::Clamp] {
            assert_eq!(OutOfRangePolicy::from_name(policy.name()), Some(policy));
        }
        assert_eq!(BoundaryPolicy::from_name("lower_bound"), None);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(BoundaryPolicy::default(), BoundaryPolicy::StartInclusive);
        assert_eq!(OutOfRangePolicy::default(), OutOfRangePolicy::Reject);
    }
}

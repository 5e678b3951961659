//! Error handling for schedule files

use std::io;

use crate::phase_error::PhaseError;

/// Unified error to report failures while reading a phase schedule from YAML.
#[derive(Debug)]
pub enum ScheduleFileError {
    IoError(io::Error),
    ParseError(String),
    MissingField(String),
    InvalidValue { field: String, message: String },
    Phase(PhaseError),
}

impl std::fmt::Display for ScheduleFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ScheduleFileError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            ScheduleFileError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            ScheduleFileError::MissingField(ref field) =>
                write!(f, "Missing Field: {}", field),
            ScheduleFileError::InvalidValue { ref field, ref message } =>
                write!(f, "Invalid Value for {}: {}", field, message),
            ScheduleFileError::Phase(ref err) =>
                write!(f, "Phase Sequence Error: {}", err),
        }
    }
}

impl std::error::Error for ScheduleFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScheduleFileError::IoError(err) => Some(err),
            ScheduleFileError::Phase(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ScheduleFileError {
    fn from(err: io::Error) -> Self {
        ScheduleFileError::IoError(err)
    }
}

impl From<PhaseError> for ScheduleFileError {
    fn from(err: PhaseError) -> Self {
        ScheduleFileError::Phase(err)
    }
}

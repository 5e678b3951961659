//! Supports reading mode schedules from YAML files (optional)

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use yaml_rust2::{Yaml, YamlLoader};

use crate::gait::GaitPattern;
use crate::phase_sequence::{ContinuousModeSequence, DiscreteModeSequence, PhaseSequence};
use crate::policies::{BoundaryPolicy, OutOfRangePolicy};
use crate::schedule_error::ScheduleFileError;
use crate::time::SwitchTime;

/// Mode schedule read from a file, over continuous or discrete time.
#[derive(Debug, Clone)]
pub enum ModeSchedule {
    Continuous(ContinuousModeSequence),
    Discrete(DiscreteModeSequence),
}

impl ModeSchedule {
    /// Read the schedule from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # Trot, 3 cycles
    /// time: continuous
    /// start_time: 0.0
    /// boundary_policy: start_inclusive
    /// out_of_range: reject
    /// cycles: 3
    /// phases:
    ///   - { mode: 0, duration: 0.175 }
    ///   - { mode: 1, duration: 0.175 }
    /// ```
    /// Everything except `phases` is optional. `time` is either `continuous` (default)
    /// or `discrete`, the latter requiring integer start time and durations.
    ///
    /// Phases with the same mode number share one payload.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ScheduleFileError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        debug!("reading schedule from {}", path.display());
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ScheduleFileError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| ScheduleFileError::ParseError(format!("{}", e)))?;
        let root = docs
            .first()
            .ok_or_else(|| ScheduleFileError::ParseError("empty document".to_string()))?;

        let boundary_policy = match optional_str(root, "boundary_policy")? {
            None => BoundaryPolicy::default(),
            Some(name) => BoundaryPolicy::from_name(name)
                .ok_or_else(|| invalid("boundary_policy", format!("unknown policy '{}'", name)))?,
        };
        let out_of_range = match optional_str(root, "out_of_range")? {
            None => OutOfRangePolicy::default(),
            Some(name) => OutOfRangePolicy::from_name(name)
                .ok_or_else(|| invalid("out_of_range", format!("unknown policy '{}'", name)))?,
        };
        let cycles = match field(root, "cycles") {
            None => 1,
            Some(v) => v
                .as_i64()
                .and_then(|c| usize::try_from(c).ok())
                .ok_or_else(|| invalid("cycles", format!("expected non-negative integer, got {:?}", v)))?,
        };

        let entries = field(root, "phases")
            .ok_or_else(|| ScheduleFileError::MissingField("phases".to_string()))?
            .as_vec()
            .ok_or_else(|| invalid("phases", "expected a list".to_string()))?;

        let schedule = match optional_str(root, "time")?.unwrap_or("continuous") {
            "continuous" => {
                let start = match field(root, "start_time") {
                    None => 0.0,
                    Some(v) => real(v, "start_time")?,
                };
                let steps = read_steps(entries, |v, label| real(v, label))?;
                ModeSchedule::Continuous(
                    build(start, steps, cycles)?
                        .with_boundary_policy(boundary_policy)
                        .with_out_of_range_policy(out_of_range),
                )
            }
            "discrete" => {
                let start = match field(root, "start_time") {
                    None => 0,
                    Some(v) => integer(v, "start_time")?,
                };
                let steps = read_steps(entries, |v, label| integer(v, label))?;
                check_discrete_end(start, &steps, cycles)?;
                ModeSchedule::Discrete(
                    build(start, steps, cycles)?
                        .with_boundary_policy(boundary_policy)
                        .with_out_of_range_policy(out_of_range),
                )
            }
            other => return Err(invalid("time", format!("expected continuous or discrete, got '{}'", other))),
        };
        debug!("schedule loaded: {} phases", schedule.num_phases());
        Ok(schedule)
    }

    pub fn num_phases(&self) -> usize {
        match self {
            ModeSchedule::Continuous(s) => s.num_phases(),
            ModeSchedule::Discrete(s) => s.num_phases(),
        }
    }

    pub fn with_boundary_policy(self, policy: BoundaryPolicy) -> Self {
        match self {
            ModeSchedule::Continuous(s) => ModeSchedule::Continuous(s.with_boundary_policy(policy)),
            ModeSchedule::Discrete(s) => ModeSchedule::Discrete(s.with_boundary_policy(policy)),
        }
    }

    pub fn with_out_of_range_policy(self, policy: OutOfRangePolicy) -> Self {
        match self {
            ModeSchedule::Continuous(s) => ModeSchedule::Continuous(s.with_out_of_range_policy(policy)),
            ModeSchedule::Discrete(s) => ModeSchedule::Discrete(s.with_out_of_range_policy(policy)),
        }
    }

    /// Convert to string yaml representation. Cycles are written out as an explicit phase list.
    pub fn to_yaml(&self) -> String {
        match self {
            ModeSchedule::Continuous(s) => sequence_yaml("continuous", s, real_text),
            ModeSchedule::Discrete(s) => sequence_yaml("discrete", s, |d: i32| d.to_string()),
        }
    }
}

/// Last boundary of a discrete schedule must fit in `i32`.
fn check_discrete_end(start: i32, steps: &[(usize, i32)], cycles: usize) -> Result<(), ScheduleFileError> {
    let period = steps.iter().try_fold(0i64, |acc, (_, d)| acc.checked_add(*d as i64));
    let end = period
        .zip(i64::try_from(cycles).ok())
        .and_then(|(period, cycles)| period.checked_mul(cycles))
        .and_then(|total| total.checked_add(start as i64));
    match end {
        Some(end) if i32::try_from(end).is_ok() => Ok(()),
        _ => Err(invalid(
            "phases",
            format!("schedule end time does not fit in 32 bits (start {}, {} cycles)", start, cycles),
        )),
    }
}

/// Continuous durations are written with 13 significant digits, which drops the
/// residue of subtracting two boundaries (0.20000000000000004 is written as 0.2).
fn real_text(duration: f64) -> String {
    let rounded: f64 = format!("{:.12e}", duration).parse().unwrap_or(duration);
    format!("{:?}", rounded)
}

fn sequence_yaml<T: SwitchTime>(
    kind: &str,
    sequence: &PhaseSequence<usize, T>,
    duration_text: impl Fn(T) -> String,
) -> String {
    let phases = sequence
        .phases()
        .zip(sequence.boundaries().windows(2))
        .map(|(mode, b)| format!("  - {{ mode: {}, duration: {} }}\n", mode, duration_text(b[1] - b[0])))
        .collect::<String>();
    format!(
        "time: {}\n\
        start_time: {:?}\n\
        boundary_policy: {}\n\
        out_of_range: {}\n\
        phases:\n{}",
        kind,
        sequence.start_time(),
        sequence.boundary_policy().name(),
        sequence.out_of_range_policy().name(),
        if phases.is_empty() { "  []\n".to_string() } else { phases }
    )
}

/// Unroll the steps into a sequence, sharing one payload per mode number.
fn build<T: SwitchTime>(
    start: T,
    steps: Vec<(usize, T)>,
    cycles: usize,
) -> Result<PhaseSequence<usize, T>, ScheduleFileError> {
    let mut shared: HashMap<usize, Arc<usize>> = HashMap::new();
    let steps = steps
        .into_iter()
        .map(|(mode, duration)| {
            let phase = shared.entry(mode).or_insert_with(|| Arc::new(mode)).clone();
            (phase, duration)
        })
        .collect();
    Ok(GaitPattern::new(steps)?.unroll(start, cycles)?)
}

fn read_steps<T>(
    entries: &[Yaml],
    duration_of: impl Fn(&Yaml, &str) -> Result<T, ScheduleFileError>,
) -> Result<Vec<(usize, T)>, ScheduleFileError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| -> Result<(usize, T), ScheduleFileError> {
            let mode_label = format!("phases[{}].mode", i);
            let duration_label = format!("phases[{}].duration", i);
            let mode = field(entry, "mode")
                .ok_or_else(|| ScheduleFileError::MissingField(mode_label.clone()))?;
            let mode = mode
                .as_i64()
                .and_then(|m| usize::try_from(m).ok())
                .ok_or_else(|| invalid(&mode_label, format!("expected non-negative integer, got {:?}", mode)))?;
            let duration = field(entry, "duration")
                .ok_or_else(|| ScheduleFileError::MissingField(duration_label.clone()))?;
            Ok((mode, duration_of(duration, &duration_label)?))
        })
        .collect()
}

/// Value of `key`, or None if absent or null.
fn field<'a>(node: &'a Yaml, key: &str) -> Option<&'a Yaml> {
    match &node[key] {
        Yaml::BadValue | Yaml::Null => None,
        value => Some(value),
    }
}

fn optional_str<'a>(node: &'a Yaml, key: &str) -> Result<Option<&'a str>, ScheduleFileError> {
    match field(node, key) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| invalid(key, format!("expected a string, got {:?}", v))),
    }
}

/// Reals and integers are both accepted as real values.
fn real(value: &Yaml, label: &str) -> Result<f64, ScheduleFileError> {
    let parsed = match value {
        Yaml::Integer(i) => Some(*i as f64),
        Yaml::Real(_) => value.as_f64(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(label, format!("expected a finite number, got {:?}", value))),
    }
}

fn integer(value: &Yaml, label: &str) -> Result<i32, ScheduleFileError> {
    value
        .as_i64()
        .and_then(|i| i32::try_from(i).ok())
        .ok_or_else(|| invalid(label, format!("expected a 32 bit integer, got {:?}", value)))
}

fn invalid(field: &str, message: String) -> ScheduleFileError {
    ScheduleFileError::InvalidValue { field: field.to_string(), message }
}

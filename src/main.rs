use std::fmt::Display;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rs_phase_schedule::phase_sequence::PhaseSequence;
use rs_phase_schedule::policies::{BoundaryPolicy, OutOfRangePolicy};
use rs_phase_schedule::schedule_from_file::ModeSchedule;
use rs_phase_schedule::time::SwitchTime;
use rs_phase_schedule::utils::{dump_sequence, dump_switch_events};

/// Inspect a phase schedule: print its phases, switching events and the phase active at given times.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Schedule YAML file
    file: PathBuf,

    /// Times to look up (repeatable)
    #[arg(short, long = "time", allow_negative_numbers = true)]
    times: Vec<f64>,

    /// Clamp times outside the schedule to the first or last phase
    #[arg(long)]
    clamp: bool,

    /// Switching times belong to the phase ending there
    #[arg(long)]
    end_inclusive: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut schedule = ModeSchedule::from_yaml_file(&args.file)
        .with_context(|| format!("Failed to load schedule from {}", args.file.display()))?;
    if args.clamp {
        schedule = schedule.with_out_of_range_policy(OutOfRangePolicy::Clamp);
    }
    if args.end_inclusive {
        schedule = schedule.with_boundary_policy(BoundaryPolicy::EndInclusive);
    }

    match &schedule {
        ModeSchedule::Continuous(sequence) => report(sequence, args.times),
        ModeSchedule::Discrete(sequence) => {
            let mut steps = Vec::with_capacity(args.times.len());
            for t in args.times {
                if t.fract() != 0.0 || t < i32::MIN as f64 || t > i32::MAX as f64 {
                    bail!("Discrete schedule needs integer times, got {}", t);
                }
                steps.push(t as i32);
            }
            report(sequence, steps)
        }
    }
}

fn report<P: Display, T: SwitchTime>(sequence: &PhaseSequence<P, T>, times: Vec<T>) -> Result<()> {
    println!("Phases:");
    dump_sequence(sequence);
    println!("Switches:");
    dump_switch_events(sequence);

    for time in times {
        let idx = sequence
            .idx_from_time(time)
            .with_context(|| format!("Lookup of time {:?} failed", time))?;
        let phase = sequence.phase_from_idx(idx)?;
        match sequence.switch_event_from_idx(idx) {
            Ok(event) => println!(
                "t={:?}: phase {} mode {}, next switch at {:?} to mode {}",
                time, idx, phase, event.switch_time, event.post_phase
            ),
            Err(_) => println!("t={:?}: phase {} mode {}, no further switch", time, idx, phase),
        }
    }
    Ok(())
}

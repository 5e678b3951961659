//! Helper functions

use std::fmt::Display;

use crate::phase_sequence::PhaseSequence;
use crate::time::SwitchTime;

/// Format the phase table, one row per phase: index, start, end, duration and payload.
pub fn format_sequence<P: Display, T: SwitchTime>(sequence: &PhaseSequence<P, T>) -> String {
    if sequence.is_empty() {
        return format!("No phases (start {:.3})\n", sequence.start_time().as_f64());
    }
    let mut table = String::new();
    for (idx, (phase, b)) in sequence
        .phases()
        .zip(sequence.boundaries().windows(2))
        .enumerate()
    {
        table.push_str(&format!(
            "[{:3}] {:9.3} .. {:9.3}  ({:7.3})  {}\n",
            idx,
            b[0].as_f64(),
            b[1].as_f64(),
            (b[1] - b[0]).as_f64(),
            phase
        ));
    }
    table
}

/// Format switching events, one row per event: time, outgoing and incoming phase.
pub fn format_switch_events<P: Display, T: SwitchTime>(sequence: &PhaseSequence<P, T>) -> String {
    if sequence.num_switches() == 0 {
        return "No switches\n".to_string();
    }
    sequence
        .switch_events()
        .map(|e| {
            format!(
                "{:9.3}  {} -> {}\n",
                e.switch_time.as_f64(),
                e.pre_phase,
                e.post_phase
            )
        })
        .collect()
}

/// Print the phase table.
#[allow(dead_code)]
pub fn dump_sequence<P: Display, T: SwitchTime>(sequence: &PhaseSequence<P, T>) {
    print!("{}", format_sequence(sequence));
}

/// Print the switching events.
#[allow(dead_code)]
pub fn dump_switch_events<P: Display, T: SwitchTime>(sequence: &PhaseSequence<P, T>) {
    print!("{}", format_switch_events(sequence));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_format_sequence() {
        let mut sequence = PhaseSequence::new(0);
        sequence.add_phase(Arc::new("A"), 2).unwrap();
        sequence.add_phase(Arc::new("B"), 3).unwrap();

        let table = format_sequence(&sequence);
        assert_eq!(table.lines().count(), 2);
        assert!(table.lines().next().unwrap().ends_with("A"));
        assert!(table.contains("5.000"));

        let events = format_switch_events(&sequence);
        assert_eq!(events, "    2.000  A -> B\n");
    }

    #[test]
    fn test_format_empty() {
        let sequence: PhaseSequence<usize, f64> = PhaseSequence::new(1.0);
        assert_eq!(format_sequence(&sequence), "No phases (start 1.000)\n");
        assert_eq!(format_switch_events(&sequence), "No switches\n");
    }
}

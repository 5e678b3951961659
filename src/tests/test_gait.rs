#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::gait::{bound, stand, trot, walk};
    use crate::policies::OutOfRangePolicy;

    #[test]
    fn test_stand_single_phase() {
        let sequence = stand(1.0).unwrap().unroll(0.0, 3).unwrap();
        assert_eq!(sequence.num_phases(), 3);
        assert_eq!(sequence.num_switches(), 2);
        assert!(sequence.phases().all(|m| m.feet_in_stance() == 4));
    }

    #[test]
    fn test_trot_diagonal_pairs() {
        let pattern = trot(0.35).unwrap();
        assert!((pattern.period() - 0.35).abs() < 1e-12);

        let sequence = pattern.unroll(0.0, 2).unwrap();
        assert_eq!(sequence.num_phases(), 4);

        let first = sequence.phase_from_time(0.1).unwrap();
        assert_eq!(first.stance, [true, false, false, true]);
        let second = sequence.phase_from_time(0.2).unwrap();
        assert_eq!(second.stance, [false, true, true, false]);

        // Second cycle reuses the first cycle's payloads
        let third = sequence.phase_from_time(0.45).unwrap();
        assert!(Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn test_walk_three_feet_in_stance() {
        let sequence = walk(0.8)
            .unwrap()
            .unroll(0.0, 2)
            .unwrap();
        assert_eq!(sequence.num_phases(), 8);
        for k in 0..160 {
            let mode = sequence.phase_from_time(k as f64 * 0.01).unwrap();
            assert_eq!(mode.feet_in_stance(), 3, "t = {}", k as f64 * 0.01);
        }
    }

    #[test]
    fn test_bound_switch_events() {
        let sequence = bound(0.4).unwrap().unroll(0.0, 2).unwrap();
        let events: Vec<_> = sequence.switch_events().collect();
        assert_eq!(events.len(), 3);
        for (k, event) in events.iter().enumerate() {
            assert!((event.switch_time - 0.2 * (k + 1) as f64).abs() < 1e-12);
            assert_ne!(event.pre_phase.stance, event.post_phase.stance);
        }
        assert_eq!(events[0].pre_phase.name, "bound_front");
        assert_eq!(events[0].post_phase.name, "bound_rear");
    }

    #[test]
    fn test_gait_beyond_horizon_clamped() {
        let sequence = trot(0.4)
            .unwrap()
            .unroll(0.0, 1)
            .unwrap()
            .with_out_of_range_policy(OutOfRangePolicy::Clamp);
        let last = sequence.phase_from_time(10.0).unwrap();
        assert_eq!(last.name, "trot_fr_rl");
    }
}

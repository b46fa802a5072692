//! Property tests for move planning and the controller's travel bounds.

mod common;

use proptest::prelude::*;

use common::axis_at;
use stepper_axis::motion::{Ramp, RAMP_INCREMENT_US};
use stepper_axis::{Microsteps, MotorConfig, MoveExecutor, StepTiming, Steps};

fn microsteps() -> impl Strategy<Value = Microsteps> {
    prop_oneof![
        Just(Microsteps::FULL),
        Just(Microsteps::HALF),
        Just(Microsteps::QUARTER),
        Just(Microsteps::EIGHTH),
    ]
}

fn config_with(fullsteps: Microsteps, accel: bool) -> MotorConfig {
    MotorConfig {
        fullsteps,
        accel,
        ..MotorConfig::default()
    }
}

fn plan(from: i64, to: i64, config: &MotorConfig) -> MoveExecutor {
    let timing = StepTiming::from_config(config).unwrap();
    MoveExecutor::new(Steps(from), Steps(to), config, &timing)
}

proptest! {
    #[test]
    fn planned_positions_stay_within_travel(
        from in 0i64..3600,
        to in -500i64..4500,
        fullsteps in microsteps(),
        accel in any::<bool>(),
    ) {
        let config = config_with(fullsteps, accel);
        for step in plan(from, to, &config) {
            prop_assert!(step.position.0 >= 0);
            prop_assert!(step.position < config.limit);
        }
    }

    #[test]
    fn stride_is_constant_and_never_overshoots(
        from in 0i64..3600,
        to in 0i64..3600,
        fullsteps in microsteps(),
    ) {
        let config = config_with(fullsteps, false);
        let mut executor = plan(from, to, &config);
        let stride = executor.stride();
        let mut previous = from;

        while let Some(step) = executor.next_step() {
            prop_assert_eq!(step.position.0 - previous, stride);
            previous = step.position.0;
        }

        // stopped short of the target by less than one stride
        prop_assert!((to - previous).abs() < stride.abs());
        prop_assert!((to - previous).signum() * stride.signum() >= 0);
    }

    #[test]
    fn reachable_target_is_reached(
        from in 0i64..3600,
        to in 0i64..3600,
    ) {
        let config = config_with(Microsteps::FULL, true);
        let mut executor = plan(from, to, &config);

        let steps = executor.by_ref().count() as i64;
        prop_assert_eq!(executor.position(), Steps(to));
        prop_assert_eq!(steps, (to - from).abs());
    }

    #[test]
    fn delay_never_drops_below_base(
        from in 0i64..3600,
        to in 0i64..3600,
        accel in any::<bool>(),
    ) {
        let config = config_with(Microsteps::FULL, accel);
        let timing = StepTiming::from_config(&config).unwrap();
        for step in plan(from, to, &config) {
            prop_assert!(step.delay_us >= timing.half_step_delay_us);
        }
    }

    #[test]
    fn ramp_decays_to_cruise_away_from_target(
        remaining in prop::collection::vec(0u64..400, 0..300),
        fullsteps in microsteps(),
    ) {
        let mut ramp = Ramp::new(true, fullsteps);
        for r in remaining {
            ramp.update(r);
        }

        let decay_steps = ramp.slow_us() / RAMP_INCREMENT_US + 1;
        for _ in 0..decay_steps {
            ramp.update(10_000);
        }
        prop_assert_eq!(ramp.slow_us(), 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn controller_position_stays_bounded(
        start in 0i64..3600,
        targets in prop::collection::vec(-1000i64..5000, 1..6),
        fullsteps in microsteps(),
    ) {
        let config = config_with(fullsteps, false);
        let limit = config.limit;
        let (mut axis, _lines) = axis_at(start, config);

        for target in targets {
            let reached = axis.move_to(target).unwrap();
            prop_assert!(reached.0 >= 0);
            prop_assert!(reached < limit);
            prop_assert!(!axis.is_moving());

            let nudged = axis.nudge().unwrap();
            prop_assert!(nudged.0 >= 0);
            prop_assert!(nudged < limit);
            prop_assert!((nudged.0 - reached.0).abs() <= 1);
        }
    }
}

// Duty-cycle aggregation from ignition and movement signals
use super::join::timestamp_join;
use super::telemetry::ParameterSeries;

/// Rounded percentage of observed time per operating state.
///
/// Independent rounding means the sum may drift to 99 or 101; that drift is
/// left uncorrected. All three are zero when no pairs were observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyCycle {
    pub off: u32,
    pub on: u32,
    pub in_motion: u32,
}

impl DutyCycle {
    pub fn zero() -> Self {
        Self {
            off: 0,
            on: 0,
            in_motion: 0,
        }
    }
}

/// Classify each ignition/movement pair and aggregate to percentages.
///
/// The movement series is timestamp-joined onto the ignition series with a
/// default of 0 (stationary) for unmatched instants. Ignition off counts as
/// off no matter what movement reports, so every pair lands in exactly one
/// bucket. Nonzero readings count as on/moving.
pub fn duty_cycle(ignition: &ParameterSeries, movement: &ParameterSeries) -> DutyCycle {
    let pairs = timestamp_join(ignition, movement, 0.0);
    if pairs.is_empty() {
        return DutyCycle::zero();
    }

    let mut off = 0usize;
    let mut on = 0usize;
    let mut in_motion = 0usize;
    for (ignition_sample, movement_value) in &pairs {
        if ignition_sample.value == 0.0 {
            off += 1;
        } else if *movement_value == 0.0 {
            on += 1;
        } else {
            in_motion += 1;
        }
    }

    let total = pairs.len() as f64;
    let percent = |count: usize| ((count as f64 / total) * 100.0).round() as u32;

    DutyCycle {
        off: percent(off),
        on: percent(on),
        in_motion: percent(in_motion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parameter::Parameter;
    use crate::domain::telemetry::{Sample, SeriesStatistics};
    use crate::domain::timestamp::Timestamp;

    fn series(parameter: Parameter, values: &[f64]) -> ParameterSeries {
        let samples = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let raw = format!("2025-01-15T08:00:{i:02}Z");
                Sample::new(Timestamp::parse(&raw).unwrap(), *value)
            })
            .collect();
        ParameterSeries::new(parameter, samples, SeriesStatistics::default())
    }

    #[test]
    fn test_classification_scenario() {
        // Pairs: (1,1) in-motion, (1,0) on, (1,1) in-motion, (0,0) off,
        // (0,1) off. Movement is ignored when ignition is 0.
        let ignition = series(Parameter::IgnitionState, &[1.0, 1.0, 1.0, 0.0, 0.0]);
        let movement = series(Parameter::MovementState, &[1.0, 0.0, 1.0, 0.0, 1.0]);

        let result = duty_cycle(&ignition, &movement);
        assert_eq!(result.off, 40);
        assert_eq!(result.on, 20);
        assert_eq!(result.in_motion, 40);
    }

    #[test]
    fn test_empty_join_is_all_zero() {
        let ignition = series(Parameter::IgnitionState, &[]);
        let movement = series(Parameter::MovementState, &[]);
        assert_eq!(duty_cycle(&ignition, &movement), DutyCycle::zero());
    }

    #[test]
    fn test_missing_movement_defaults_to_idle() {
        let ignition = series(Parameter::IgnitionState, &[1.0, 1.0]);
        let movement = ParameterSeries::empty(Parameter::MovementState);

        let result = duty_cycle(&ignition, &movement);
        assert_eq!(result.on, 100);
        assert_eq!(result.off, 0);
        assert_eq!(result.in_motion, 0);
    }

    #[test]
    fn test_rounding_drift_stays_within_one() {
        // 3 pairs at one-third each: 33 + 33 + 33 = 99.
        let ignition = series(Parameter::IgnitionState, &[0.0, 1.0, 1.0]);
        let movement = series(Parameter::MovementState, &[0.0, 0.0, 1.0]);

        let result = duty_cycle(&ignition, &movement);
        let sum = result.off + result.on + result.in_motion;
        assert!((99..=101).contains(&sum));
        assert_eq!(result.off, 33);
        assert_eq!(result.on, 33);
        assert_eq!(result.in_motion, 33);
    }

    #[test]
    fn test_sum_property_across_mixes() {
        for (ign, mov) in [
            (vec![1.0; 7], vec![0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0]),
            (vec![0.0, 1.0, 0.0, 1.0, 1.0, 1.0], vec![1.0; 6]),
            (vec![1.0], vec![1.0]),
        ] {
            let ignition = series(Parameter::IgnitionState, &ign);
            let movement = series(Parameter::MovementState, &mov);
            let result = duty_cycle(&ignition, &movement);
            let sum = result.off + result.on + result.in_motion;
            assert!((99..=101).contains(&sum), "sum {sum} out of tolerance");
        }
    }
}

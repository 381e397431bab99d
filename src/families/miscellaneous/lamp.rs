//! Incandescent lamps (MIL-HDBK-217F section 20.1)

use crate::analysis::derating::{check_current_limit, OverstressResult, TierLimits};
use crate::core::attributes::Attributes;
use crate::core::error::{ReliabilityError, Result};
use crate::core::limits::StressLimits;
use crate::core::lookup::{get_by_id, LookupContext};

const FAMILY: &str = "lamp";

pub const PART_COUNT_LAMBDA_B: [f64; 14] = [
    3.9, 7.8, 12.0, 12.0, 16.0, 16.0, 16.0, 19.0, 23.0, 19.0, 2.7, 16.0, 23.0, 100.0,
];

pub const PART_COUNT_PI_Q: [f64; 1] = [1.0];

pub const PART_STRESS_PI_Q: [f64; 1] = [1.0];

pub const PI_E: [f64; 14] = [
    1.0, 2.0, 3.0, 3.0, 4.0, 4.0, 4.0, 5.0, 6.0, 5.0, 0.7, 4.0, 6.0, 27.0,
];

/// Application factor: 1 AC, 2 DC
pub const PI_A: [f64; 2] = [1.0, 3.3];

pub fn get_part_count_lambda_b(environment_id: u32) -> Result<f64> {
    get_by_id(
        &PART_COUNT_LAMBDA_B,
        environment_id,
        LookupContext::new(FAMILY, "get_part_count_lambda_b", "environment"),
    )
}

pub fn calculate_part_count(attributes: &Attributes) -> Result<f64> {
    get_part_count_lambda_b(attributes.get_id("environment_active_id")?)
}

pub fn get_environment_factor(environment_id: u32) -> Result<f64> {
    get_by_id(
        &PI_E,
        environment_id,
        LookupContext::new(FAMILY, "get_environment_factor", "environment"),
    )
}

/// `λb = 0.074 · Vr^1.29` with Vr the rated voltage
pub fn calculate_part_stress_lambda_b(voltage_rated: f64) -> f64 {
    0.074 * voltage_rated.powf(1.29)
}

/// Utilization factor from the percentage of time the lamp is lit
pub fn get_utilization_factor(duty_cycle: f64) -> f64 {
    if duty_cycle < 10.0 {
        0.1
    } else if duty_cycle <= 90.0 {
        0.72
    } else {
        1.0
    }
}

pub fn get_application_factor(application_id: u32) -> Result<f64> {
    get_by_id(
        &PI_A,
        application_id,
        LookupContext::new(FAMILY, "get_application_factor", "application"),
    )
}

/// Part stress inputs
#[derive(Debug, Clone, PartialEq)]
pub struct LampStress {
    /// Rated voltage; must be positive
    pub voltage_rated: f64,
    /// Percent of operating time the lamp is lit
    pub duty_cycle: f64,
    pub application_id: u32,
    pub pi_e: f64,
}

impl LampStress {
    pub fn from_attributes(attributes: &Attributes) -> Result<Self> {
        let voltage_rated = attributes.get_f64("voltage_rated")?;
        if voltage_rated <= 0.0 {
            return Err(ReliabilityError::type_mismatch("voltage_rated", "a positive number"));
        }
        Ok(Self {
            voltage_rated,
            duty_cycle: attributes.get_f64("duty_cycle")?,
            application_id: attributes.get_id("application_id")?,
            pi_e: attributes.get_f64("piE")?,
        })
    }
}

/// `λp = λb · πU · πA · πE`
pub fn calculate_part_stress(attributes: &Attributes) -> Result<Attributes> {
    let request = LampStress::from_attributes(attributes)?;
    let lambda_b = calculate_part_stress_lambda_b(request.voltage_rated);
    let pi_u = get_utilization_factor(request.duty_cycle);
    let pi_a = get_application_factor(request.application_id)?;
    let hazard_rate = lambda_b * pi_u * pi_a * request.pi_e;
    tracing::debug!(family = FAMILY, lambda_b, pi_u, pi_a, hazard_rate, "part stress");

    let mut out = attributes.clone();
    out.insert("lambda_b", lambda_b);
    out.insert("piU", pi_u);
    out.insert("piA", pi_a);
    out.insert("hazard_rate_active", hazard_rate);
    Ok(out)
}

/// Current ratio against `miscellaneous.lamp.current`
pub fn do_derating_analysis(
    environment_id: u32,
    limits: &StressLimits,
    attributes: &Attributes,
) -> Result<OverstressResult> {
    let tier = TierLimits::new(limits, vec!["miscellaneous", "lamp"], environment_id, FAMILY);
    let current_limit = tier.get("current")?;
    let current_ratio = attributes.get_ratio("current_ratio")?;

    let mut result = OverstressResult::default();
    result.record(check_current_limit(current_ratio, current_limit));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> StressLimits {
        StressLimits::from_yaml_str("miscellaneous:\n  lamp:\n    current: [0.1, 0.1, 0.1]\n")
            .unwrap()
    }

    fn stress(voltage_rated: f64) -> Attributes {
        Attributes::new()
            .with("voltage_rated", voltage_rated)
            .with("duty_cycle", 50.0)
            .with("application_id", 2_i64)
            .with("piE", 3.0)
    }

    #[test]
    fn test_part_stress() {
        let out = calculate_part_stress(&stress(28.0)).unwrap();
        let expected = 0.074 * 28.0_f64.powf(1.29) * 0.72 * 3.3 * 3.0;
        assert!((out.get_f64("hazard_rate_active").unwrap() - expected).abs() < 1e-10);
        assert_eq!(out.get_f64("piU").unwrap(), 0.72);
        assert_eq!(out.get_f64("piA").unwrap(), 3.3);
    }

    #[test]
    fn test_non_positive_rated_voltage_rejected() {
        let err = calculate_part_stress(&stress(0.0)).unwrap_err();
        assert!(matches!(err, ReliabilityError::TypeMismatch { ref field, .. } if field == "voltage_rated"));
    }

    #[test]
    fn test_utilization_factor_bands() {
        assert_eq!(get_utilization_factor(5.0), 0.1);
        assert_eq!(get_utilization_factor(10.0), 0.72);
        assert_eq!(get_utilization_factor(90.0), 0.72);
        assert_eq!(get_utilization_factor(95.0), 1.0);
    }

    #[test]
    fn test_derating_within_limit() {
        let attrs = Attributes::new().with("current_ratio", 0.05);
        let result = do_derating_analysis(1, &limits(), &attrs).unwrap();
        assert_eq!(result.as_tuple(), (0, ""));
    }

    #[test]
    fn test_derating_overstress() {
        let attrs = Attributes::new().with("current_ratio", 0.95);
        let result = do_derating_analysis(1, &limits(), &attrs).unwrap();
        assert_eq!(
            result.as_tuple(),
            (1, "Current ratio of 0.95 exceeds the allowable limit of 0.1.\n")
        );
    }

    #[test]
    fn test_derating_bad_inputs() {
        let text = Attributes::new().with("current_ratio", "high");
        assert!(matches!(
            do_derating_analysis(1, &limits(), &text),
            Err(ReliabilityError::TypeMismatch { .. })
        ));
        let ok = Attributes::new().with("current_ratio", 0.05);
        let err = do_derating_analysis(4, &limits(), &ok).unwrap_err();
        assert!(matches!(err, ReliabilityError::Range { family: "lamp", id: 4, .. }));
    }
}

//! Electronic filters (MIL-HDBK-217F section 21.1)

use crate::core::attributes::Attributes;
use crate::core::error::Result;
use crate::core::lookup::{get_by_id, LookupContext};

const FAMILY: &str = "filter";

pub const PART_COUNT_LAMBDA_B: [f64; 14] = [
    0.022, 0.044, 0.13, 0.088, 0.20, 0.15, 0.20, 0.24, 0.29, 0.24, 0.018, 0.15, 0.33, 2.6,
];

pub const PART_COUNT_PI_Q: [f64; 2] = [1.0, 2.9];

pub const PART_STRESS_PI_Q: [f64; 2] = [1.0, 2.9];

pub const PI_E: [f64; 14] = [
    1.0, 2.0, 6.0, 4.0, 9.0, 7.0, 9.0, 11.0, 13.0, 11.0, 0.8, 7.0, 15.0, 120.0,
];

/// Base hazard rate by filter type:
///
/// 1. ceramic-ferrite
/// 2. discrete LC
/// 3. discrete LC and crystal
/// 4. discrete LC, hybrid
pub const LAMBDA_B: [f64; 4] = [0.022, 0.12, 0.12, 0.27];

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

pub fn calculate_part_stress_lambda_b(type_id: u32) -> Result<f64> {
    get_by_id(
        &LAMBDA_B,
        type_id,
        LookupContext::new(FAMILY, "calculate_part_stress_lambda_b", "type"),
    )
}

/// Part stress inputs
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStress {
    pub type_id: u32,
    pub pi_q: f64,
    pub pi_e: f64,
}

impl FilterStress {
    pub fn from_attributes(attributes: &Attributes) -> Result<Self> {
        Ok(Self {
            type_id: attributes.get_id("type_id")?,
            pi_q: attributes.get_f64("piQ")?,
            pi_e: attributes.get_f64("piE")?,
        })
    }
}

/// `λp = λb · πQ · πE`
pub fn calculate_part_stress(attributes: &Attributes) -> Result<Attributes> {
    let request = FilterStress::from_attributes(attributes)?;
    let lambda_b = calculate_part_stress_lambda_b(request.type_id)?;
    let hazard_rate = lambda_b * request.pi_q * request.pi_e;
    tracing::debug!(family = FAMILY, lambda_b, hazard_rate, "part stress");

    let mut out = attributes.clone();
    out.insert("lambda_b", lambda_b);
    out.insert("hazard_rate_active", hazard_rate);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ReliabilityError;

    #[test]
    fn test_part_stress_by_type() {
        let attrs = Attributes::new()
            .with("type_id", 4_i64)
            .with("piQ", 2.9)
            .with("piE", 6.0);
        let out = calculate_part_stress(&attrs).unwrap();
        assert!((out.get_f64("hazard_rate_active").unwrap() - 0.27 * 2.9 * 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_bad_type() {
        let attrs = Attributes::new()
            .with("type_id", 5_i64)
            .with("piQ", 1.0)
            .with("piE", 1.0);
        assert!(matches!(
            calculate_part_stress(&attrs),
            Err(ReliabilityError::Range { family: "filter", id: 5, .. })
        ));
    }

    #[test]
    fn test_part_count() {
        assert_eq!(get_part_count_lambda_b(3).unwrap(), 0.13);
        assert!(get_part_count_lambda_b(0).is_err());
    }
}

//! Fuses (MIL-HDBK-217F section 22.1)

use crate::core::attributes::Attributes;
use crate::core::error::Result;
use crate::core::lookup::{get_by_id, LookupContext};

const FAMILY: &str = "fuse";

pub const PART_COUNT_LAMBDA_B: [f64; 14] = [
    0.010, 0.020, 0.080, 0.050, 0.11, 0.090, 0.12, 0.15, 0.18, 0.16, 0.009, 0.10, 0.21, 2.3,
];

pub const PART_COUNT_PI_Q: [f64; 1] = [1.0];

pub const PART_STRESS_PI_Q: [f64; 1] = [1.0];

pub const PI_E: [f64; 14] = [
    1.0, 2.0, 8.0, 5.0, 11.0, 9.0, 12.0, 15.0, 18.0, 16.0, 0.9, 10.0, 21.0, 230.0,
];

/// Part stress base hazard rate
pub const LAMBDA_B: f64 = 0.010;

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

/// Part stress inputs
#[derive(Debug, Clone, PartialEq)]
pub struct FuseStress {
    /// Environment factor (required)
    pub pi_e: f64,
}

impl FuseStress {
    pub fn from_attributes(attributes: &Attributes) -> Result<Self> {
        Ok(Self {
            pi_e: attributes.get_f64("piE")?,
        })
    }

    pub fn hazard_rate(&self) -> f64 {
        LAMBDA_B * self.pi_e
    }
}

/// `λp = λb · πE`
pub fn calculate_part_stress(attributes: &Attributes) -> Result<Attributes> {
    let request = FuseStress::from_attributes(attributes)?;
    let hazard_rate = request.hazard_rate();
    tracing::debug!(family = FAMILY, lambda_b = LAMBDA_B, hazard_rate, "part stress");

    let mut out = attributes.clone();
    out.insert("lambda_b", LAMBDA_B);
    out.insert("hazard_rate_active", hazard_rate);
    Ok(out)
}

//! Quartz crystals (MIL-HDBK-217F section 19.1)

use crate::core::attributes::Attributes;
use crate::core::error::Result;
use crate::core::lookup::{get_by_id, LookupContext};

const FAMILY: &str = "crystal";

/// Frequency substituted when the operating frequency is not positive
pub const DEFAULT_FREQUENCY_MHZ: f64 = 50.0;

pub const PART_COUNT_LAMBDA_B: [f64; 14] = [
    0.032, 0.096, 0.32, 0.19, 0.51, 0.38, 0.54, 0.70, 0.90, 0.74, 0.016, 0.42, 1.0, 16.0,
];

pub const PART_COUNT_PI_Q: [f64; 2] = [1.0, 3.4];

pub const PART_STRESS_PI_Q: [f64; 2] = [1.0, 2.1];

pub const PI_E: [f64; 14] = [
    1.0, 3.0, 10.0, 6.0, 16.0, 12.0, 17.0, 22.0, 28.0, 23.0, 0.5, 13.0, 32.0, 500.0,
];

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

/// `λb = 0.013 · f^0.23` with f in MHz
pub fn calculate_part_stress_lambda_b(frequency_operating: f64) -> f64 {
    0.013 * frequency_operating.powf(0.23)
}

/// Part stress inputs
#[derive(Debug, Clone, PartialEq)]
pub struct CrystalStress {
    /// Operating frequency in MHz; non-positive values fall back to 50 MHz
    pub frequency_operating: f64,
    pub pi_q: f64,
    pub pi_e: f64,
}

impl CrystalStress {
    pub fn from_attributes(attributes: &Attributes) -> Result<Self> {
        let mut frequency_operating = attributes.get_f64("frequency_operating")?;
        if frequency_operating <= 0.0 {
            tracing::warn!(
                frequency_operating,
                default = DEFAULT_FREQUENCY_MHZ,
                "crystal frequency not positive, using default"
            );
            frequency_operating = DEFAULT_FREQUENCY_MHZ;
        }
        Ok(Self {
            frequency_operating,
            pi_q: attributes.get_f64("piQ")?,
            pi_e: attributes.get_f64("piE")?,
        })
    }
}

/// `λp = λb · πQ · πE`
pub fn calculate_part_stress(attributes: &Attributes) -> Result<Attributes> {
    let request = CrystalStress::from_attributes(attributes)?;
    let lambda_b = calculate_part_stress_lambda_b(request.frequency_operating);
    let hazard_rate = lambda_b * request.pi_q * request.pi_e;
    tracing::debug!(family = FAMILY, lambda_b, hazard_rate, "part stress");

    let mut out = attributes.clone();
    out.insert("frequency_operating", request.frequency_operating);
    out.insert("lambda_b", lambda_b);
    out.insert("hazard_rate_active", hazard_rate);
    Ok(out)
}

//! Operating-to-rated stress ratios

use crate::core::attributes::Attributes;
use crate::core::error::{ReliabilityError, Result};

/// Ratio of operating to rated stress
pub fn calculate_stress_ratio(operating: f64, rated: f64) -> Result<f64> {
    if rated <= 0.0 || rated.is_nan() {
        return Err(ReliabilityError::InvalidParameter {
            name: "rated stress",
            value: rated,
            reason: "must be greater than zero",
        });
    }
    Ok(operating / rated)
}

/// Voltage ratio counts AC and DC components together
pub fn calculate_voltage_ratio(voltage_ac: f64, voltage_dc: f64, voltage_rated: f64) -> Result<f64> {
    calculate_stress_ratio(voltage_ac + voltage_dc, voltage_rated)
}

/// Fill `current_ratio`, `power_ratio` and `voltage_ratio` from operating and
/// rated values
///
/// A ratio is only computed when both its operating and rated values are
/// present, so callers that already supply ratios keep them. Either AC or DC
/// operating voltage is enough; the other defaults to zero.
pub fn calculate_stress_ratios(attributes: &Attributes) -> Result<Attributes> {
    let mut out = attributes.clone();

    let has = |operating: &str, rated: &str| {
        attributes.contains_key(operating) && attributes.contains_key(rated)
    };

    if has("current_operating", "current_rated") {
        let ratio = calculate_stress_ratio(
            attributes.get_f64("current_operating")?,
            attributes.get_f64("current_rated")?,
        )?;
        out.insert("current_ratio", ratio);
    }
    if has("power_operating", "power_rated") {
        let ratio = calculate_stress_ratio(
            attributes.get_f64("power_operating")?,
            attributes.get_f64("power_rated")?,
        )?;
        out.insert("power_ratio", ratio);
    }
    if has("voltage_ac_operating", "voltage_rated") || has("voltage_dc_operating", "voltage_rated") {
        let ratio = calculate_voltage_ratio(
            attributes.get_f64_or("voltage_ac_operating", 0.0)?,
            attributes.get_f64_or("voltage_dc_operating", 0.0)?,
            attributes.get_f64("voltage_rated")?,
        )?;
        out.insert("voltage_ratio", ratio);
    }

    Ok(out)
}

//! Resistors (MIL-HDBK-217F section 9)
//!
//! | ID | Style                                   | Section |
//! |----|-----------------------------------------|---------|
//! | 1  | fixed, composition (RC, RCR)            | 9.1     |
//! | 2  | fixed, film (RL, RLR, RN, RNC, RNN, RNR)| 9.2     |
//! | 3  | fixed, film, power (RD)                 | 9.3     |
//! | 4  | fixed, film, network (RZ)               | 9.4     |
//! | 5  | fixed, wirewound (RB, RBR)              | 9.5     |
//! | 6  | fixed, wirewound, power (RW, RWR)       | 9.6     |
//! | 7  | fixed, wirewound, chassis (RE, RER)     | 9.7     |
//! | 8  | thermistor (RTH)                        | 9.8     |
//! | 9  | variable, wirewound (RT, RTR)           | 9.9     |
//! | 10 | variable, wirewound, precision (RR)     | 9.10    |
//! | 11 | variable, wirewound, semiprecision      | 9.11    |
//! | 12 | variable, wirewound, power (RP)         | 9.12    |
//! | 13 | variable, non-wirewound (RJ, RJR)       | 9.13    |
//! | 14 | variable, composition (RV)              | 9.14    |
//! | 15 | variable, film and precision (RQ, RVC)  | 9.15    |

use crate::analysis::derating::{
    check_power_limit, check_temperature_limit, check_voltage_limit, OverstressResult, TierLimits,
};
use crate::core::attributes::Attributes;
use crate::core::error::{ReliabilityError, Result};
use crate::core::limits::StressLimits;
use crate::core::lookup::{band_index, get_by_id, get_table_by_id, LookupContext};

const FAMILY: &str = "resistor";

/// Rated power below this (in W) selects the low power derating limits
pub const LOW_POWER_THRESHOLD: f64 = 0.5;

const PART_COUNT_LAMBDA_B_FILM: [&[f64]; 4] = [
    &[0.0012, 0.0027, 0.011, 0.0054, 0.020, 0.0063, 0.013, 0.018, 0.033, 0.030, 0.00025, 0.014, 0.044, 0.69],
    &[0.0012, 0.0027, 0.011, 0.0054, 0.020, 0.0063, 0.013, 0.018, 0.033, 0.030, 0.00025, 0.014, 0.044, 0.69],
    &[0.0014, 0.0031, 0.013, 0.0061, 0.023, 0.0072, 0.014, 0.021, 0.038, 0.034, 0.00028, 0.016, 0.050, 0.78],
    &[0.0014, 0.0031, 0.013, 0.0061, 0.023, 0.0072, 0.014, 0.021, 0.038, 0.034, 0.00028, 0.016, 0.050, 0.78],
];

const PART_COUNT_LAMBDA_B_WIREWOUND_POWER: [&[f64]; 2] = [
    &[0.014, 0.031, 0.16, 0.077, 0.26, 0.073, 0.15, 0.19, 0.39, 0.42, 0.0042, 0.21, 0.62, 9.4],
    &[0.013, 0.028, 0.15, 0.070, 0.24, 0.065, 0.13, 0.18, 0.35, 0.38, 0.0038, 0.19, 0.56, 8.6],
];

/// Part count base hazard rates for the styles that do not depend on the
/// specification; rows 2 and 6 are placeholders for the per-specification
/// tables above
const PART_COUNT_LAMBDA_B: [&[f64]; 15] = [
    &[0.0005, 0.0022, 0.0071, 0.0037, 0.012, 0.0052, 0.0065, 0.016, 0.025, 0.025, 0.00025, 0.0098, 0.035, 0.36],
    &[],
    &[0.012, 0.025, 0.13, 0.062, 0.21, 0.078, 0.10, 0.19, 0.24, 0.32, 0.0060, 0.18, 0.47, 8.2],
    &[0.0023, 0.0066, 0.031, 0.013, 0.055, 0.022, 0.043, 0.077, 0.15, 0.10, 0.0011, 0.055, 0.15, 1.7],
    &[0.0085, 0.018, 0.10, 0.045, 0.16, 0.15, 0.17, 0.30, 0.38, 0.26, 0.0068, 0.13, 0.37, 5.4],
    &[],
    &[0.008, 0.18, 0.096, 0.045, 0.15, 0.044, 0.088, 0.12, 0.24, 0.25, 0.004, 0.13, 0.37, 5.5],
    &[0.065, 0.32, 1.4, 0.71, 1.6, 0.71, 1.9, 1.0, 2.7, 2.4, 0.032, 1.3, 3.4, 62.0],
    &[0.025, 0.055, 0.35, 0.15, 0.58, 0.16, 0.26, 0.35, 0.58, 1.1, 0.013, 0.52, 1.6, 24.0],
    &[0.33, 0.73, 7.0, 2.9, 12.0, 3.5, 5.3, 7.1, 9.8, 23.0, 0.16, 11.0, 33.0, 510.0],
    &[0.15, 0.35, 3.1, 1.2, 5.4, 1.9, 2.8, 0.0, 0.0, 9.0, 0.075, 0.0, 0.0, 0.0],
    &[0.15, 0.34, 2.9, 1.2, 5.0, 1.6, 2.4, 0.0, 0.0, 7.6, 0.076, 0.0, 0.0, 0.0],
    &[0.043, 0.15, 0.75, 0.35, 1.3, 0.39, 0.78, 1.8, 2.8, 2.5, 0.21, 1.2, 3.7, 49.0],
    &[0.05, 0.11, 1.1, 0.45, 1.7, 2.8, 4.6, 4.6, 7.5, 3.3, 0.025, 1.5, 4.7, 67.0],
    &[0.048, 0.16, 0.76, 0.36, 1.3, 0.36, 0.72, 1.4, 2.2, 2.3, 0.024, 1.2, 3.4, 52.0],
];

pub const PART_COUNT_PI_Q: [f64; 6] = [0.030, 0.10, 0.30, 1.0, 3.0, 10.0];

pub const PART_STRESS_PI_Q: [&[f64]; 15] = [
    &[0.03, 0.1, 0.3, 1.0, 5.0, 15.0],
    &[0.03, 0.1, 0.3, 1.0, 5.0, 5.0, 15.0],
    &[1.0, 3.0],
    &[1.0, 3.0],
    &[0.03, 0.1, 0.3, 1.0, 5.0, 15.0],
    &[0.03, 0.1, 0.3, 1.0, 5.0, 15.0],
    &[0.03, 0.1, 0.3, 1.0, 5.0, 15.0],
    &[1.0, 15.0],
    &[0.02, 0.06, 0.2, 0.6, 3.0, 10.0],
    &[2.5, 5.0],
    &[2.0, 4.0],
    &[2.0, 4.0],
    &[0.02, 0.06, 0.2, 0.6, 3.0, 10.0],
    &[2.5, 5.0],
    &[2.0, 4.0],
];

pub const PI_E: [[f64; 14]; 15] = [
    [1.0, 3.0, 8.0, 5.0, 13.0, 4.0, 5.0, 7.0, 11.0, 19.0, 0.5, 11.0, 27.0, 490.0],
    [1.0, 2.0, 8.0, 4.0, 14.0, 4.0, 8.0, 10.0, 18.0, 19.0, 0.2, 10.0, 28.0, 510.0],
    [1.0, 2.0, 10.0, 5.0, 17.0, 6.0, 8.0, 14.0, 18.0, 25.0, 0.5, 14.0, 36.0, 660.0],
    [1.0, 2.0, 10.0, 5.0, 17.0, 6.0, 8.0, 14.0, 18.0, 25.0, 0.5, 14.0, 36.0, 660.0],
    [1.0, 2.0, 11.0, 5.0, 18.0, 15.0, 18.0, 28.0, 35.0, 27.0, 0.8, 14.0, 38.0, 610.0],
    [1.0, 2.0, 10.0, 5.0, 16.0, 4.0, 8.0, 9.0, 18.0, 23.0, 0.3, 13.0, 34.0, 610.0],
    [1.0, 2.0, 10.0, 5.0, 16.0, 4.0, 8.0, 9.0, 18.0, 23.0, 0.5, 13.0, 34.0, 610.0],
    [1.0, 5.0, 21.0, 11.0, 24.0, 11.0, 30.0, 16.0, 42.0, 37.0, 0.5, 20.0, 53.0, 950.0],
    [1.0, 2.0, 12.0, 6.0, 20.0, 5.0, 8.0, 9.0, 15.0, 33.0, 0.5, 18.0, 48.0, 870.0],
    [1.0, 2.0, 18.0, 8.0, 30.0, 8.0, 12.0, 13.0, 18.0, 53.0, 0.5, 29.0, 76.0, 1400.0],
    [1.0, 2.0, 16.0, 7.0, 28.0, 8.0, 12.0, 0.0, 0.0, 38.0, 0.5, 0.0, 0.0, 0.0],
    [1.0, 3.0, 16.0, 7.0, 28.0, 8.0, 12.0, 0.0, 0.0, 38.0, 0.5, 0.0, 0.0, 0.0],
    [1.0, 3.0, 14.0, 6.0, 24.0, 5.0, 7.0, 12.0, 18.0, 39.0, 0.5, 22.0, 57.0, 1000.0],
    [1.0, 2.0, 19.0, 8.0, 29.0, 40.0, 65.0, 48.0, 78.0, 46.0, 0.5, 25.0, 66.0, 1200.0],
    [1.0, 3.0, 14.0, 7.0, 24.0, 6.0, 12.0, 20.0, 30.0, 39.0, 0.5, 22.0, 57.0, 1000.0],
];

// Resistance factor (πR) tables. A resistance in the n-th band between
// breakpoints selects the n-th entry. Zero entries are resistance ranges the
// handbook does not tabulate for that family.

const PI_R_COMPOSITION_FILM: [f64; 4] = [1.0, 1.1, 1.6, 2.5];
const PI_R_FILM_POWER: [f64; 4] = [1.0, 1.2, 1.3, 3.5];
const PI_R_WIREWOUND: [f64; 4] = [1.0, 1.7, 3.0, 5.0];
const PI_R_VARIABLE_WIREWOUND: [f64; 3] = [1.0, 1.4, 2.0];
const PI_R_PRECISION: [f64; 6] = [1.0, 1.1, 1.4, 2.0, 2.5, 3.5];
const PI_R_NON_WIREWOUND: [f64; 5] = [1.0, 1.1, 1.2, 1.4, 1.8];

/// RWR styles (specification 1), by family
const PI_R_WIREWOUND_POWER_RWR: [&[f64]; 8] = [
    &[1.0, 1.0, 1.2, 1.2, 1.6, 1.6, 1.6, 0.0],
    &[1.0, 1.0, 1.0, 1.2, 1.6, 1.6, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 1.0, 1.2, 1.2, 1.2, 1.6],
    &[1.0, 1.2, 1.6, 1.6, 0.0, 0.0, 0.0, 0.0],
    &[1.0, 1.6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    &[1.0, 1.6, 1.6, 0.0, 0.0, 0.0, 0.0, 0.0],
    &[1.0, 1.0, 1.1, 1.2, 1.2, 1.6, 0.0, 0.0],
    &[1.0, 1.0, 1.4, 0.0, 0.0, 0.0, 0.0, 0.0],
];

/// RW styles (specification 2), by family
const PI_R_WIREWOUND_POWER_RW: [&[f64]; 35] = [
    &[1.0, 1.0, 1.0, 1.0, 1.2, 1.6],
    &[1.0, 1.0, 1.0, 1.2, 1.6, 0.0],
    &[1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 2.0, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 2.0, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 2.0, 0.0, 0.0],
    &[1.0, 1.2, 1.4, 0.0, 0.0, 0.0],
    &[1.0, 1.0, 1.6, 0.0, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 2.0, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 1.4, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 1.2, 0.0, 0.0],
    &[1.0, 1.0, 1.4, 0.0, 0.0, 0.0],
    &[1.0, 1.2, 1.6, 0.0, 0.0, 0.0],
    &[1.0, 1.0, 1.4, 0.0, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 0.0, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 1.4, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 1.4, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 1.4, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 1.5, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 1.4, 1.6, 0.0],
    &[1.0, 1.0, 1.0, 1.4, 1.6, 2.0],
    &[1.0, 1.0, 1.0, 1.4, 1.6, 2.0],
    &[1.0, 1.0, 1.4, 2.4, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 2.6, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
    &[1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    &[1.0, 1.2, 1.4, 0.0, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
    &[1.0, 1.0, 1.0, 1.6, 0.0, 0.0],
    &[1.0, 1.0, 1.4, 0.0, 0.0, 0.0],
    &[1.0, 1.2, 1.5, 0.0, 0.0, 0.0],
    &[1.0, 1.2, 0.0, 0.0, 0.0, 0.0],
];

/// RER styles (specification 1), by family
const PI_R_CHASSIS_RER: [&[f64]; 6] = [
    &[1.0, 1.2, 1.2, 1.6, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 1.2, 1.6, 0.0],
    &[1.0, 1.0, 1.0, 1.1, 1.2, 1.6],
    &[1.0, 1.0, 1.0, 1.0, 1.2, 1.6],
    &[1.0, 1.0, 1.0, 1.0, 1.2, 1.6],
];

/// RE styles (specification 2), by family
const PI_R_CHASSIS_RE: [&[f64]; 6] = [
    &[1.0, 1.2, 1.6, 0.0, 0.0, 0.0],
    &[1.0, 1.2, 1.6, 0.0, 0.0, 0.0],
    &[1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
    &[1.0, 1.0, 1.1, 1.2, 1.4, 0.0],
    &[1.0, 1.0, 1.0, 1.2, 1.6, 0.0],
    &[1.0, 1.0, 1.0, 1.1, 1.4, 0.0],
];

const PI_V_WIREWOUND: [f64; 7] = [1.1, 1.05, 1.0, 1.1, 1.22, 1.4, 2.0];
const PI_V_NON_WIREWOUND: [f64; 3] = [1.0, 1.05, 1.2];
const PI_V_BREAKS_WIREWOUND: [f64; 6] = [0.1, 0.2, 0.6, 0.7, 0.8, 0.9];
const PI_V_BREAKS_NON_WIREWOUND: [f64; 2] = [0.8, 0.9];

/// Construction class factor for subcategory 10
pub const PI_C_PRECISION: [f64; 4] = [2.0, 1.0, 3.0, 1.5];
/// Construction class factor for subcategory 12
pub const PI_C_POWER: [f64; 2] = [2.0, 1.0];

/// Thermistor base hazard rate: bead, disk, rod
pub const LAMBDA_B_THERMISTOR: [f64; 3] = [0.021, 0.065, 0.105];

/// Network base hazard rate per film element
pub const LAMBDA_B_NETWORK: f64 = 0.00006;

/// λb model constants `[f0, f1, f2, f3, f4, f5]` and reference temperature
/// in K, for the styles using the thermal/stress model
fn lambda_b_model(subcategory_id: u32, specification_id: Option<u32>) -> Result<([f64; 6], f64)> {
    let model = match subcategory_id {
        1 => ([4.5e-9, 12.0, 1.0, 0.6, 1.0, 1.0], 343.0),
        2 => match require_id(specification_id, "specification_id")? {
            1 | 2 => ([3.25e-4, 1.0, 3.0, 1.0, 1.0, 1.0], 343.0),
            3 | 4 => ([5.0e-5, 3.5, 1.0, 1.0, 1.0, 1.0], 398.0),
            id => return Err(out_of_range("calculate_part_stress_lambda_b", "specification", id, 4)),
        },
        3 => ([7.33e-3, 0.202, 2.6, 1.45, 0.89, 1.3], 298.0),
        5 => ([0.0031, 1.0, 10.0, 1.0, 1.0, 1.5], 398.0),
        6 => ([0.00148, 1.0, 2.0, 0.5, 1.0, 1.0], 298.0),
        7 => ([0.00015, 2.64, 1.0, 0.466, 1.0, 1.0], 298.0),
        9 => ([0.0062, 1.0, 5.0, 1.0, 1.0, 1.0], 358.0),
        10 => ([0.0735, 1.03, 4.45, 2.74, 3.51, 1.0], 358.0),
        11 => ([0.0398, 0.514, 5.28, 1.44, 4.46, 1.0], 313.0),
        12 => ([0.0481, 0.334, 4.66, 1.47, 2.83, 1.0], 298.0),
        13 => ([0.019, 0.445, 7.3, 2.69, 2.46, 1.0], 358.0),
        14 => ([0.0246, 0.459, 9.3, 2.32, 5.3, 1.0], 343.0),
        15 => ([0.018, 1.0, 7.4, 2.55, 3.6, 1.0], 343.0),
        id => return Err(unknown_subcategory("calculate_part_stress_lambda_b", id)),
    };
    Ok(model)
}

fn unknown_subcategory(operation: &'static str, id: u32) -> ReliabilityError {
    ReliabilityError::UnknownCategory {
        family: FAMILY,
        operation,
        kind: "subcategory",
        id,
    }
}

fn out_of_range(operation: &'static str, table: &'static str, id: u32, len: usize) -> ReliabilityError {
    ReliabilityError::Range {
        family: FAMILY,
        operation,
        table,
        id,
        len,
    }
}

fn require_id(value: Option<u32>, key: &str) -> Result<u32> {
    value.ok_or_else(|| ReliabilityError::missing_key(key))
}

fn require_f64(value: Option<f64>, key: &str) -> Result<f64> {
    value.ok_or_else(|| ReliabilityError::missing_key(key))
}

fn check_subcategory(subcategory_id: u32, operation: &'static str) -> Result<()> {
    if (1..=15).contains(&subcategory_id) {
        Ok(())
    } else {
        Err(unknown_subcategory(operation, subcategory_id))
    }
}

fn row(subcategory_id: u32) -> usize {
    subcategory_id as usize - 1
}

/// Part count base hazard rate
///
/// Fixed film (2) and fixed wirewound power (6) resistors are tabulated per
/// specification; `specification_id` is ignored for the other styles.
pub fn get_part_count_lambda_b(
    subcategory_id: u32,
    specification_id: Option<u32>,
    environment_id: u32,
) -> Result<f64> {
    const OP: &str = "get_part_count_lambda_b";
    check_subcategory(subcategory_id, OP)?;
    let table = match subcategory_id {
        2 => get_table_by_id(
            &PART_COUNT_LAMBDA_B_FILM,
            require_id(specification_id, "specification_id")?,
            LookupContext::new(FAMILY, OP, "specification"),
        )?,
        6 => get_table_by_id(
            &PART_COUNT_LAMBDA_B_WIREWOUND_POWER,
            require_id(specification_id, "specification_id")?,
            LookupContext::new(FAMILY, OP, "specification"),
        )?,
        sub => PART_COUNT_LAMBDA_B[row(sub)],
    };
    get_by_id(table, environment_id, LookupContext::new(FAMILY, OP, "environment"))
}

pub fn calculate_part_count(attributes: &Attributes) -> Result<f64> {
    let subcategory_id = attributes.get_id("subcategory_id")?;
    let specification_id = if matches!(subcategory_id, 2 | 6) {
        Some(attributes.get_id("specification_id")?)
    } else {
        None
    };
    get_part_count_lambda_b(
        subcategory_id,
        specification_id,
        attributes.get_id("environment_active_id")?,
    )
}

pub fn get_environment_factor(subcategory_id: u32, environment_id: u32) -> Result<f64> {
    check_subcategory(subcategory_id, "get_environment_factor")?;
    get_by_id(
        &PI_E[row(subcategory_id)],
        environment_id,
        LookupContext::new(FAMILY, "get_environment_factor", "environment"),
    )
}

/// The part count quality factor is common to every style
pub fn get_part_count_quality_factor(subcategory_id: u32, quality_id: u32) -> Result<f64> {
    check_subcategory(subcategory_id, "get_part_count_quality_factor")?;
    get_by_id(
        &PART_COUNT_PI_Q,
        quality_id,
        LookupContext::new(FAMILY, "get_part_count_quality_factor", "quality"),
    )
}

pub fn get_part_stress_quality_factor(subcategory_id: u32, quality_id: u32) -> Result<f64> {
    check_subcategory(subcategory_id, "get_part_stress_quality_factor")?;
    get_by_id(
        PART_STRESS_PI_Q[row(subcategory_id)],
        quality_id,
        LookupContext::new(FAMILY, "get_part_stress_quality_factor", "quality"),
    )
}

/// Case temperature and temperature factor πT for film networks
///
/// `Tcase = T + 55·S`, `πT = exp(-4056·(1/(Tcase + 273) - 1/298))`
pub fn calculate_temperature_factor(temperature_active: f64, power_ratio: f64) -> (f64, f64) {
    let temperature_case = temperature_active + 55.0 * power_ratio;
    let pi_t = (-4056.0 * (1.0 / (temperature_case + 273.0) - 1.0 / 298.0)).exp();
    (temperature_case, pi_t)
}

/// Number-of-taps factor for potentiometers
pub fn calculate_taps_factor(n_elements: f64) -> f64 {
    n_elements.powf(1.5) / 25.0 + 0.792
}

/// Resistance factor πR
///
/// Returns 1.0 for the network and thermistor styles, which have none.
pub fn get_resistance_factor(
    subcategory_id: u32,
    specification_id: Option<u32>,
    family_id: Option<u32>,
    resistance: f64,
) -> Result<f64> {
    const OP: &str = "get_resistance_factor";
    let (breaks, values): (&[f64], &[f64]) = match subcategory_id {
        1 | 2 => (&[1.0e5, 1.0e6, 1.0e7], &PI_R_COMPOSITION_FILM),
        3 => (&[100.0, 1.0e5, 1.0e6], &PI_R_FILM_POWER),
        4 | 8 => return Ok(1.0),
        5 => (&[1.0e4, 1.0e5, 1.0e6], &PI_R_WIREWOUND),
        6 | 7 => {
            let spec = require_id(specification_id, "specification_id")?;
            let family = require_id(family_id, "family_id")?;
            let (breaks, families): (&[f64], &[&[f64]]) = match (subcategory_id, spec) {
                (6, 1) => (&[500.0, 1.0e3, 5.0e3, 7.5e3, 1.0e4, 1.5e4, 2.0e4], &PI_R_WIREWOUND_POWER_RWR),
                (6, 2) => (&[1.0e3, 1.0e4, 1.0e5, 1.5e5, 2.0e5], &PI_R_WIREWOUND_POWER_RW),
                (7, 1) => (&[500.0, 1.0e3, 5.0e3, 1.0e4, 2.0e4], &PI_R_CHASSIS_RER),
                (7, 2) => (&[500.0, 1.0e3, 5.0e3, 1.0e4, 2.0e4], &PI_R_CHASSIS_RE),
                (_, id) => return Err(out_of_range(OP, "specification", id, 2)),
            };
            let values = get_table_by_id(families, family, LookupContext::new(FAMILY, OP, "family"))?;
            (breaks, values)
        }
        9 | 11 | 12 => (&[2.0e3, 5.0e3], &PI_R_VARIABLE_WIREWOUND),
        10 => (&[1.0e4, 2.0e4, 5.0e4, 1.0e5, 2.0e5], &PI_R_PRECISION),
        13 | 14 => (&[5.0e4, 1.0e5, 2.0e5, 5.0e5], &PI_R_NON_WIREWOUND),
        15 => (&[1.0e4, 5.0e4, 2.0e5, 1.0e6], &PI_R_NON_WIREWOUND),
        id => return Err(unknown_subcategory(OP, id)),
    };

    match values.get(band_index(breaks, resistance)).copied() {
        Some(pi_r) if pi_r > 0.0 => Ok(pi_r),
        _ => Err(ReliabilityError::InvalidParameter {
            name: "resistance",
            value: resistance,
            reason: "outside the range tabulated for this resistor family",
        }),
    }
}

/// Voltage factor πV for potentiometers (subcategories 9 through 15)
pub fn get_voltage_factor(subcategory_id: u32, voltage_ratio: f64) -> Result<f64> {
    let (breaks, values): (&[f64], &[f64]) = match subcategory_id {
        9..=12 => (&PI_V_BREAKS_WIREWOUND, &PI_V_WIREWOUND),
        13..=15 => (&PI_V_BREAKS_NON_WIREWOUND, &PI_V_NON_WIREWOUND),
        id => return Err(unknown_subcategory("get_voltage_factor", id)),
    };
    Ok(values[band_index(breaks, voltage_ratio)])
}

/// Construction class factor πC (subcategories 10 and 12)
pub fn get_construction_factor(subcategory_id: u32, construction_id: u32) -> Result<f64> {
    const OP: &str = "get_construction_factor";
    let table: &[f64] = match subcategory_id {
        10 => &PI_C_PRECISION,
        12 => &PI_C_POWER,
        id => return Err(unknown_subcategory(OP, id)),
    };
    get_by_id(table, construction_id, LookupContext::new(FAMILY, OP, "construction"))
}

/// Part stress inputs
///
/// Which optional fields are required depends on the subcategory:
/// `specification_id` for 2, 6 and 7; `family_id` for 6 and 7; `type_id`
/// for 8; `n_elements` for 4 and 9 through 15; `voltage_ratio` for 9
/// through 15; `construction_id` for 10 and 12.
#[derive(Debug, Clone, PartialEq)]
pub struct ResistorStress {
    pub subcategory_id: u32,
    /// Ambient temperature in C
    pub temperature_active: f64,
    pub power_ratio: f64,
    /// Resistance in ohms
    pub resistance: Option<f64>,
    pub specification_id: Option<u32>,
    pub family_id: Option<u32>,
    pub type_id: Option<u32>,
    pub n_elements: Option<f64>,
    pub voltage_ratio: Option<f64>,
    pub construction_id: Option<u32>,
    pub pi_q: f64,
    pub pi_e: f64,
}

impl ResistorStress {
    pub fn from_attributes(attributes: &Attributes) -> Result<Self> {
        let sub = attributes.get_id("subcategory_id")?;
        check_subcategory(sub, "calculate_part_stress")?;

        let id_if = |needed: bool, key: &str| -> Result<Option<u32>> {
            if needed {
                attributes.get_id(key).map(Some)
            } else {
                Ok(None)
            }
        };
        let f64_if = |needed: bool, key: &str| -> Result<Option<f64>> {
            if needed {
                attributes.get_f64(key).map(Some)
            } else {
                Ok(None)
            }
        };
        let potentiometer = (9..=15).contains(&sub);

        Ok(Self {
            subcategory_id: sub,
            temperature_active: attributes.get_f64("temperature_active")?,
            power_ratio: attributes.get_f64("power_ratio")?,
            resistance: f64_if(!matches!(sub, 4 | 8), "resistance")?,
            specification_id: id_if(matches!(sub, 2 | 6 | 7), "specification_id")?,
            family_id: id_if(matches!(sub, 6 | 7), "family_id")?,
            type_id: id_if(sub == 8, "type_id")?,
            n_elements: f64_if(sub == 4 || potentiometer, "n_elements")?,
            voltage_ratio: f64_if(potentiometer, "voltage_ratio")?,
            construction_id: id_if(matches!(sub, 10 | 12), "construction_id")?,
            pi_q: attributes.get_f64("piQ")?,
            pi_e: attributes.get_f64("piE")?,
        })
    }

    /// Part stress base hazard rate
    pub fn lambda_b(&self) -> Result<f64> {
        match self.subcategory_id {
            4 => Ok(LAMBDA_B_NETWORK),
            8 => get_by_id(
                &LAMBDA_B_THERMISTOR,
                require_id(self.type_id, "type_id")?,
                LookupContext::new(FAMILY, "calculate_part_stress_lambda_b", "type"),
            ),
            sub => {
                let ([f0, f1, f2, f3, f4, f5], ref_temp) = lambda_b_model(sub, self.specification_id)?;
                let kelvin = self.temperature_active + 273.0;
                let thermal = (f1 * (kelvin / ref_temp)).exp().powf(f2);
                let stress = ((self.power_ratio / f3) * (kelvin / 273.0)).powf(f4).exp().powf(f5);
                Ok(f0 * thermal * stress)
            }
        }
    }
}

/// `λp = λb · πQ · πE` times the style's own factors
pub fn calculate_part_stress(attributes: &Attributes) -> Result<Attributes> {
    let r = ResistorStress::from_attributes(attributes)?;
    let sub = r.subcategory_id;
    let lambda_b = r.lambda_b()?;
    let mut out = attributes.clone();
    let mut hazard_rate = lambda_b * r.pi_q * r.pi_e;

    match sub {
        4 => {
            // Tcase is always derived from ambient and power ratio
            let (temperature_case, pi_t) =
                calculate_temperature_factor(r.temperature_active, r.power_ratio);
            let n_elements = require_f64(r.n_elements, "n_elements")?;
            hazard_rate *= pi_t * n_elements;
            out.insert("temperature_case", temperature_case);
            out.insert("piT", pi_t);
        }
        8 => {}
        _ => {
            let pi_r = get_resistance_factor(
                sub,
                r.specification_id,
                r.family_id,
                require_f64(r.resistance, "resistance")?,
            )?;
            hazard_rate *= pi_r;
            out.insert("piR", pi_r);

            if (9..=15).contains(&sub) {
                let pi_v = get_voltage_factor(sub, require_f64(r.voltage_ratio, "voltage_ratio")?)?;
                let pi_taps = calculate_taps_factor(require_f64(r.n_elements, "n_elements")?);
                hazard_rate *= pi_v * pi_taps;
                out.insert("piV", pi_v);
                out.insert("piTAPS", pi_taps);
            }
            if matches!(sub, 10 | 12) {
                let pi_c = get_construction_factor(sub, require_id(r.construction_id, "construction_id")?)?;
                hazard_rate *= pi_c;
                out.insert("piC", pi_c);
            }
        }
    }

    tracing::debug!(family = FAMILY, subcategory_id = sub, lambda_b, hazard_rate, "part stress");
    out.insert("lambda_b", lambda_b);
    out.insert("hazard_rate_active", hazard_rate);
    Ok(out)
}

fn default_resistance(subcategory_id: u32) -> f64 {
    match subcategory_id {
        1 | 2 => 1.0e6,
        3 => 100.0,
        4 | 8 => 1000.0,
        5 => 1.0e5,
        6 | 7 | 9 | 11 | 12 => 5000.0,
        10 => 5.0e4,
        _ => 2.0e5,
    }
}

/// Element count for the styles that use one (networks and potentiometers)
fn default_elements(subcategory_id: u32) -> Option<f64> {
    match subcategory_id {
        4 => Some(10.0),
        9..=15 => Some(3.0),
        _ => None,
    }
}

/// Fill in nominal values for unset or non-positive inputs
///
/// * `power_ratio` defaults to 0.5
/// * `resistance` and `n_elements` default per style
/// * for networks, `temperature_case` defaults to 28C above ambient; part
///   stress replaces it with `T + 55·S`
pub fn set_default_values(attributes: &Attributes) -> Result<Attributes> {
    let sub = attributes.get_id("subcategory_id")?;
    check_subcategory(sub, "set_default_values")?;
    let mut out = attributes.clone();

    if attributes.get_f64_or("power_ratio", 0.0)? <= 0.0 {
        tracing::warn!(subcategory_id = sub, "resistor power ratio not set, using 0.5");
        out.insert("power_ratio", 0.5);
    }
    if attributes.get_f64_or("resistance", 0.0)? <= 0.0 {
        let resistance = default_resistance(sub);
        tracing::warn!(subcategory_id = sub, resistance, "resistor resistance not set, using default");
        out.insert("resistance", resistance);
    }
    if let Some(n_elements) = default_elements(sub) {
        if attributes.get_f64_or("n_elements", 0.0)? <= 0.0 {
            out.insert("n_elements", n_elements);
        }
    }
    if sub == 4 && attributes.get_f64_or("temperature_case", 0.0)? <= 0.0 {
        let temperature_case = attributes.get_f64("temperature_active")? + 28.0;
        tracing::warn!(temperature_case, "network case temperature not set, using ambient + 28C");
        out.insert("temperature_case", temperature_case);
    }
    Ok(out)
}

/// Derating style of a resistor subcategory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResistorStyle {
    FixedComposition,
    FixedFilm,
    FixedFilmPower,
    FixedFilmNetwork,
    FixedWirewound,
    FixedWirewoundPower,
    FixedWirewoundChassis,
    Thermistor,
    VariableWirewound,
    VariableWirewoundPrecision,
    VariableWirewoundSemiprecision,
    VariableWirewoundPower,
    VariableNonWirewound,
    VariableComposition,
    VariableFilm,
}

const STYLES: [ResistorStyle; 15] = [
    ResistorStyle::FixedComposition,
    ResistorStyle::FixedFilm,
    ResistorStyle::FixedFilmPower,
    ResistorStyle::FixedFilmNetwork,
    ResistorStyle::FixedWirewound,
    ResistorStyle::FixedWirewoundPower,
    ResistorStyle::FixedWirewoundChassis,
    ResistorStyle::Thermistor,
    ResistorStyle::VariableWirewound,
    ResistorStyle::VariableWirewoundPrecision,
    ResistorStyle::VariableWirewoundSemiprecision,
    ResistorStyle::VariableWirewoundPower,
    ResistorStyle::VariableNonWirewound,
    ResistorStyle::VariableComposition,
    ResistorStyle::VariableFilm,
];

impl ResistorStyle {
    pub fn from_id(subcategory_id: u32) -> Result<Self> {
        STYLES
            .get((subcategory_id as usize).wrapping_sub(1))
            .copied()
            .ok_or_else(|| unknown_subcategory("do_derating_analysis", subcategory_id))
    }

    /// Key in the stress limit table
    pub fn key(self) -> &'static str {
        match self {
            ResistorStyle::FixedComposition => "fixed_composition",
            ResistorStyle::FixedFilm => "fixed_film",
            ResistorStyle::FixedFilmPower => "fixed_film_power",
            ResistorStyle::FixedFilmNetwork => "fixed_film_network",
            ResistorStyle::FixedWirewound => "fixed_wirewound",
            ResistorStyle::FixedWirewoundPower => "fixed_wirewound_power",
            ResistorStyle::FixedWirewoundChassis => "fixed_wirewound_chassis",
            ResistorStyle::Thermistor => "thermistor",
            ResistorStyle::VariableWirewound => "variable_wirewound",
            ResistorStyle::VariableWirewoundPrecision => "variable_wirewound_precision",
            ResistorStyle::VariableWirewoundSemiprecision => "variable_wirewound_semiprecision",
            ResistorStyle::VariableWirewoundPower => "variable_wirewound_power",
            ResistorStyle::VariableNonWirewound => "variable_non_wirewound",
            ResistorStyle::VariableComposition => "variable_composition",
            ResistorStyle::VariableFilm => "variable_film",
        }
    }
}

/// Power ratio, then voltage ratio (styles with a voltage limit), then
/// temperature
///
/// Styles whose limits are split by power class read `power_rated` to pick
/// the low or high power limits.
pub fn do_derating_analysis(
    environment_id: u32,
    subcategory_id: u32,
    limits: &StressLimits,
    attributes: &Attributes,
) -> Result<OverstressResult> {
    let style = ResistorStyle::from_id(subcategory_id)?;
    let mut path = vec![FAMILY, style.key()];
    if limits.has_child(&path, "low_power") {
        let class = if attributes.get_ratio("power_rated")? < LOW_POWER_THRESHOLD {
            "low_power"
        } else {
            "high_power"
        };
        path.push(class);
    }
    let tier = TierLimits::new(limits, path, environment_id, FAMILY);
    let power_limit = tier.get("power")?;
    let voltage_limit = tier.get_optional("voltage")?;
    let temperature_limit = tier.get("temperature")?;

    let power_ratio = attributes.get_ratio("power_ratio")?;
    let voltage_ratio = match voltage_limit {
        Some(_) => Some(attributes.get_ratio("voltage_ratio")?),
        None => None,
    };
    let temperature_active = attributes.get_ratio("temperature_active")?;
    let temperature_rated_max = attributes.get_ratio("temperature_rated_max")?;

    let mut result = OverstressResult::default();
    result.record(check_power_limit(power_ratio, power_limit));
    if let (Some(ratio), Some(limit)) = (voltage_ratio, voltage_limit) {
        result.record(check_voltage_limit(ratio, limit));
    }
    result.record(check_temperature_limit(
        temperature_active,
        temperature_rated_max,
        temperature_limit,
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1.0)
    }

    fn stress(sub: i64) -> Attributes {
        Attributes::new()
            .with("subcategory_id", sub)
            .with("temperature_active", 40.0)
            .with("power_ratio", 0.5)
            .with("piQ", 1.0)
            .with("piE", 1.0)
    }

    #[test]
    fn test_part_count_lookup() {
        assert_eq!(get_part_count_lambda_b(1, None, 1).unwrap(), 0.0005);
        assert_eq!(get_part_count_lambda_b(2, Some(3), 1).unwrap(), 0.0014);
        assert_eq!(get_part_count_lambda_b(6, Some(2), 14).unwrap(), 8.6);
        assert!(matches!(
            get_part_count_lambda_b(2, None, 1),
            Err(ReliabilityError::MissingKey { .. })
        ));
        assert!(matches!(
            get_part_count_lambda_b(2, Some(5), 1),
            Err(ReliabilityError::Range { table: "specification", .. })
        ));
        assert!(matches!(
            get_part_count_lambda_b(16, None, 1),
            Err(ReliabilityError::UnknownCategory { family: "resistor", id: 16, .. })
        ));
        assert!(get_part_count_lambda_b(1, None, 15).is_err());
    }

    #[test]
    fn test_quality_and_environment_factors() {
        assert_eq!(get_part_count_quality_factor(9, 4).unwrap(), 1.0);
        assert_eq!(get_part_stress_quality_factor(2, 7).unwrap(), 15.0);
        assert!(get_part_stress_quality_factor(3, 3).is_err());
        assert_eq!(get_environment_factor(14, 6).unwrap(), 40.0);
    }

    #[test]
    fn test_lambda_b_thermal_stress_model() {
        let composition = ResistorStress::from_attributes(&stress(1).with("resistance", 1000.0)).unwrap();
        assert!(close(composition.lambda_b().unwrap(), 0.000_666_601_816_579_605_8));

        let power = ResistorStress::from_attributes(&stress(3).with("resistance", 1000.0)).unwrap();
        assert!(close(power.lambda_b().unwrap(), 0.022_483_997_292_588_827));
    }

    #[test]
    fn test_lambda_b_film_by_specification() {
        let rl = stress(2).with("resistance", 1000.0).with("specification_id", 1_i64);
        let rl = ResistorStress::from_attributes(&rl).unwrap();
        assert!(close(rl.lambda_b().unwrap(), 0.008_907_906_971_200_72));

        let rn = stress(2).with("resistance", 1000.0).with("specification_id", 4_i64);
        let rn = ResistorStress::from_attributes(&rn).unwrap();
        assert!(close(rn.lambda_b().unwrap(), 0.001_391_024_272_575_948_2));
    }

    #[test]
    fn test_temperature_and_taps_factors() {
        let (tc, pi_t) = calculate_temperature_factor(40.0, 0.5);
        assert_eq!(tc, 67.5);
        assert!(close(pi_t, 5.467_623_065_717_644));
        assert!(close(calculate_taps_factor(3.0), 0.999_846_096_908_265_3));
    }

    #[test]
    fn test_resistance_factor_bands() {
        assert_eq!(get_resistance_factor(1, None, None, 3300.0).unwrap(), 1.0);
        assert_eq!(get_resistance_factor(1, None, None, 1.0e5).unwrap(), 1.0);
        assert_eq!(get_resistance_factor(1, None, None, 5.0e5).unwrap(), 1.1);
        assert_eq!(get_resistance_factor(1, None, None, 2.0e7).unwrap(), 2.5);
        assert_eq!(get_resistance_factor(6, Some(1), Some(1), 6000.0).unwrap(), 1.2);
        assert_eq!(get_resistance_factor(6, Some(2), Some(1), 5.0e4).unwrap(), 1.0);
        assert_eq!(get_resistance_factor(6, Some(2), Some(1), 1.8e5).unwrap(), 1.2);
        assert_eq!(get_resistance_factor(7, Some(2), Some(4), 1.5e4).unwrap(), 1.4);
        assert_eq!(get_resistance_factor(8, None, None, 0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_resistance_factor_band_edge_stays_in_lower_band() {
        // Handbook band edges: 3.3 kOhm is below the first breakpoint, and a
        // value equal to a breakpoint does not move up a band
        assert_eq!(get_resistance_factor(1, None, None, 3300.0).unwrap(), 1.0);
        assert_eq!(get_resistance_factor(1, None, None, 1.0e6).unwrap(), 1.1);
        assert_eq!(get_resistance_factor(1, None, None, 1.000_001e6).unwrap(), 1.6);
    }

    #[test]
    fn test_resistance_factor_untabulated_range() {
        assert!(matches!(
            get_resistance_factor(6, Some(1), Some(5), 2000.0),
            Err(ReliabilityError::InvalidParameter { name: "resistance", .. })
        ));
        assert!(matches!(
            get_resistance_factor(7, Some(1), Some(7), 100.0),
            Err(ReliabilityError::Range { table: "family", id: 7, .. })
        ));
    }

    #[test]
    fn test_voltage_factor_bands() {
        assert_eq!(get_voltage_factor(9, 0.05).unwrap(), 1.1);
        assert_eq!(get_voltage_factor(9, 0.65).unwrap(), 1.1);
        assert_eq!(get_voltage_factor(12, 0.95).unwrap(), 2.0);
        assert_eq!(get_voltage_factor(13, 0.85).unwrap(), 1.05);
        assert!(get_voltage_factor(1, 0.5).is_err());
    }

    #[test]
    fn test_part_stress_composition() {
        let attrs = stress(1).with("resistance", 5.0e5).with("piE", 2.0);
        let out = calculate_part_stress(&attrs).unwrap();
        let expected = 0.000_666_601_816_579_605_8 * 1.1 * 2.0;
        assert!(close(out.get_f64("hazard_rate_active").unwrap(), expected));
        assert_eq!(out.get_f64("piR").unwrap(), 1.1);
    }

    #[test]
    fn test_part_stress_network() {
        let attrs = stress(4).with("n_elements", 10.0);
        let out = calculate_part_stress(&attrs).unwrap();
        let expected = 0.00006 * 5.467_623_065_717_644 * 10.0;
        assert!(close(out.get_f64("hazard_rate_active").unwrap(), expected));
        assert_eq!(out.get_f64("temperature_case").unwrap(), 67.5);
    }

    #[test]
    fn test_part_stress_network_recomputes_case_temperature() {
        let attrs = stress(4).with("n_elements", 10.0).with("temperature_case", 68.0);
        let out = calculate_part_stress(&attrs).unwrap();
        assert_eq!(out.get_f64("temperature_case").unwrap(), 67.5);
        assert!(close(out.get_f64("piT").unwrap(), 5.467_623_065_717_644));
    }

    #[test]
    fn test_part_stress_precision_potentiometer() {
        let attrs = stress(10)
            .with("resistance", 1.5e4)
            .with("voltage_ratio", 0.5)
            .with("n_elements", 3.0)
            .with("construction_id", 3_i64);
        let out = calculate_part_stress(&attrs).unwrap();
        let lambda_b = out.get_f64("lambda_b").unwrap();
        let expected = lambda_b * 1.1 * 1.0 * 0.999_846_096_908_265_3 * 3.0;
        assert!(close(out.get_f64("hazard_rate_active").unwrap(), expected));
        assert_eq!(out.get_f64("piC").unwrap(), 3.0);
    }

    #[test]
    fn test_part_stress_thermistor() {
        let attrs = stress(8).with("type_id", 2_i64).with("piQ", 15.0);
        let out = calculate_part_stress(&attrs).unwrap();
        assert!(close(out.get_f64("hazard_rate_active").unwrap(), 0.065 * 15.0));
        assert!(!out.contains_key("piR"));
    }

    #[test]
    fn test_part_stress_missing_style_input() {
        let attrs = stress(9).with("resistance", 1000.0).with("n_elements", 3.0);
        let err = calculate_part_stress(&attrs).unwrap_err();
        assert!(matches!(err, ReliabilityError::MissingKey { ref key } if key == "voltage_ratio"));
    }

    #[test]
    fn test_set_default_values() {
        let attrs = Attributes::new()
            .with("subcategory_id", 4_i64)
            .with("temperature_active", 30.0)
            .with("power_ratio", 0.0);
        let out = set_default_values(&attrs).unwrap();
        assert_eq!(out.get_f64("power_ratio").unwrap(), 0.5);
        assert_eq!(out.get_f64("resistance").unwrap(), 1000.0);
        assert_eq!(out.get_f64("n_elements").unwrap(), 10.0);
        assert_eq!(out.get_f64("temperature_case").unwrap(), 58.0);

        let kept = set_default_values(&stress(13).with("resistance", 470.0).with("n_elements", 5.0)).unwrap();
        assert_eq!(kept.get_f64("resistance").unwrap(), 470.0);
        assert_eq!(kept.get_f64("n_elements").unwrap(), 5.0);
        assert_eq!(kept.get_f64("power_ratio").unwrap(), 0.5);
    }

    #[test]
    fn test_set_default_values_elements_only_where_used() {
        let film = set_default_values(&stress(1)).unwrap();
        assert!(!film.contains_key("n_elements"));
        let wirewound = set_default_values(&stress(9)).unwrap();
        assert_eq!(wirewound.get_f64("n_elements").unwrap(), 3.0);
    }

    fn derating(power_rated: f64, power_ratio: f64, voltage_ratio: f64, temperature: f64) -> Attributes {
        Attributes::new()
            .with("power_rated", power_rated)
            .with("power_ratio", power_ratio)
            .with("voltage_ratio", voltage_ratio)
            .with("temperature_active", temperature)
            .with("temperature_rated_max", 125.0)
    }

    #[test]
    fn test_derating_power_classes() {
        let limits = StressLimits::builtin().unwrap();
        // 0.6 is inside the low power limit (0.65) but over the high power one (0.55)
        let low = do_derating_analysis(1, 2, &limits, &derating(0.25, 0.6, 0.5, 50.0)).unwrap();
        assert_eq!(low.as_tuple(), (0, ""));
        let high = do_derating_analysis(1, 2, &limits, &derating(1.0, 0.6, 0.5, 50.0)).unwrap();
        assert_eq!(
            high.as_tuple(),
            (1, "Power ratio of 0.6 exceeds the allowable limit of 0.55.\n")
        );
    }

    #[test]
    fn test_derating_order_power_voltage_temperature() {
        let limits = StressLimits::builtin().unwrap();
        let result = do_derating_analysis(2, 6, &limits, &derating(5.0, 0.9, 0.8, 100.0)).unwrap();
        assert_eq!(
            result.reason,
            "Power ratio of 0.9 exceeds the allowable limit of 0.6.\n\
             Voltage ratio of 0.8 exceeds the allowable limit of 0.7.\n\
             Temperature of 100.0C exceeds the derated maximum temperature of 75.0C.\n"
        );
    }

    #[test]
    fn test_derating_without_voltage_limit_ignores_voltage() {
        let limits = StressLimits::builtin().unwrap();
        let attrs = derating(1.0, 0.1, 0.0, 20.0).with("voltage_ratio", "n/a");
        let result = do_derating_analysis(3, 8, &limits, &attrs).unwrap();
        assert_eq!(result.as_tuple(), (0, ""));
    }

    #[test]
    fn test_derating_delta_temperature_style() {
        let limits = StressLimits::builtin().unwrap();
        let result = do_derating_analysis(1, 12, &limits, &derating(1.0, 0.1, 0.1, 20.0)).unwrap();
        assert_eq!(
            result.reason,
            "Temperature of 20.0C exceeds the derated maximum temperature of 110.0C less than maximum rated temperature of 125.0C.\n"
        );
    }

    #[test]
    fn test_derating_errors() {
        let limits = StressLimits::builtin().unwrap();
        assert!(matches!(
            do_derating_analysis(1, 16, &limits, &derating(1.0, 0.1, 0.1, 20.0)),
            Err(ReliabilityError::UnknownCategory { family: "resistor", id: 16, .. })
        ));
        assert!(matches!(
            do_derating_analysis(0, 3, &limits, &derating(1.0, 0.1, 0.1, 20.0)),
            Err(ReliabilityError::Range { family: "resistor", .. })
        ));
        let bad = derating(1.0, 0.1, 0.1, 20.0).with("power_ratio", "high");
        assert!(matches!(
            do_derating_analysis(1, 3, &limits, &bad),
            Err(ReliabilityError::TypeMismatch { .. })
        ));
    }
}

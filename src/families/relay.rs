//! Relays (MIL-HDBK-217F sections 13.1 and 13.2)
//!
//! Subcategory 1 is mechanical relays, subcategory 2 solid state and time
//! delay relays.

use crate::analysis::derating::{
    check_current_limit, check_temperature_limit, OverstressResult, TierLimits,
};
use crate::core::attributes::Attributes;
use crate::core::error::{ReliabilityError, Result};
use crate::core::limits::StressLimits;
use crate::core::lookup::{get_by_id, get_table_by_id, LookupContext};
use crate::families::calculate_load_stress_factor;

const FAMILY: &str = "relay";

/// Part count base hazard rates, by subcategory then type
pub const PART_COUNT_LAMBDA_B_MECHANICAL: [&[f64]; 6] = [
    &[0.13, 0.28, 2.1, 1.1, 3.8, 1.1, 1.4, 1.9, 2.0, 7.0, 0.66, 3.5, 10.0, 0.0],
    &[0.43, 0.89, 6.9, 3.6, 12.0, 3.4, 4.4, 6.2, 6.7, 22.0, 0.21, 11.0, 32.0, 0.0],
    &[0.13, 0.26, 2.1, 1.1, 3.8, 1.1, 1.4, 1.9, 2.0, 7.0, 0.66, 3.5, 10.0, 0.0],
    &[0.11, 0.23, 1.8, 0.92, 3.3, 0.96, 1.2, 2.1, 2.3, 6.5, 0.54, 3.0, 9.0, 0.0],
    &[0.29, 0.60, 4.8, 2.4, 8.2, 2.3, 2.9, 4.1, 4.5, 15.0, 0.14, 7.6, 22.0, 0.0],
    &[0.88, 1.8, 14.0, 7.4, 26.0, 7.1, 9.1, 13.0, 14.0, 46.0, 0.44, 24.0, 67.0, 0.0],
];

pub const PART_COUNT_LAMBDA_B_SOLID_STATE: [&[f64]; 2] = [
    &[0.40, 1.2, 4.8, 2.4, 6.8, 4.8, 7.6, 8.4, 13.0, 9.2, 0.16, 4.8, 13.0, 240.0],
    &[0.50, 1.5, 6.0, 3.0, 8.5, 5.0, 9.5, 11.0, 16.0, 12.0, 0.20, 5.0, 17.0, 300.0],
];

pub const PART_COUNT_PI_Q_MECHANICAL: [f64; 3] = [0.6, 3.0, 9.0];
pub const PART_COUNT_PI_Q_SOLID_STATE: [f64; 2] = [1.0, 4.0];

pub const PART_STRESS_PI_Q_MECHANICAL: [f64; 7] = [0.1, 0.3, 0.45, 0.6, 1.0, 1.5, 3.0];
pub const PART_STRESS_PI_Q_SOLID_STATE: [f64; 2] = [1.0, 4.0];

pub const PI_E_MECHANICAL: [f64; 14] = [
    1.0, 2.0, 15.0, 8.0, 27.0, 7.0, 9.0, 11.0, 12.0, 46.0, 0.5, 25.0, 66.0, 0.0,
];
pub const PI_E_SOLID_STATE: [f64; 14] = [
    1.0, 3.0, 12.0, 6.0, 17.0, 12.0, 19.0, 21.0, 32.0, 23.0, 0.4, 12.0, 33.0, 590.0,
];

/// Contact form factor (SPST through 6PDT)
pub const PI_C: [f64; 9] = [1.0, 1.5, 1.75, 2.0, 2.5, 3.0, 4.25, 5.5, 8.0];

/// Solid state base hazard rate by type
pub const LAMBDA_B_SOLID_STATE: [f64; 3] = [0.4, 0.5, 0.5];

/// Quality levels up to this one are established reliability
const ESTABLISHED_RELIABILITY_MAX_QUALITY: u32 = 6;

/// Relay subcategories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    Mechanical,
    SolidState,
}

impl RelayKind {
    pub fn from_id(subcategory_id: u32, operation: &'static str) -> Result<Self> {
        match subcategory_id {
            1 => Ok(RelayKind::Mechanical),
            2 => Ok(RelayKind::SolidState),
            id => Err(ReliabilityError::UnknownCategory {
                family: FAMILY,
                operation,
                kind: "subcategory",
                id,
            }),
        }
    }
}

/// Load application used to pick derating limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadType {
    Resistive,
    Inductive,
    Capacitive,
}

impl LoadType {
    pub fn from_id(type_id: u32, family: &'static str) -> Result<Self> {
        match type_id {
            1 => Ok(LoadType::Resistive),
            2 => Ok(LoadType::Inductive),
            3 => Ok(LoadType::Capacitive),
            id => Err(ReliabilityError::UnknownCategory {
                family,
                operation: "do_derating_analysis",
                kind: "type",
                id,
            }),
        }
    }

    /// Key in the stress limit table
    pub fn key(self) -> &'static str {
        match self {
            LoadType::Resistive => "resistive_load",
            LoadType::Inductive => "inductive_load",
            LoadType::Capacitive => "capacitive_load",
        }
    }
}

pub fn get_part_count_lambda_b(subcategory_id: u32, type_id: u32, environment_id: u32) -> Result<f64> {
    let kind = RelayKind::from_id(subcategory_id, "get_part_count_lambda_b")?;
    let rows: &[&[f64]] = match kind {
        RelayKind::Mechanical => &PART_COUNT_LAMBDA_B_MECHANICAL,
        RelayKind::SolidState => &PART_COUNT_LAMBDA_B_SOLID_STATE,
    };
    let row = get_table_by_id(rows, type_id, LookupContext::new(FAMILY, "get_part_count_lambda_b", "type"))?;
    get_by_id(
        row,
        environment_id,
        LookupContext::new(FAMILY, "get_part_count_lambda_b", "environment"),
    )
}

pub fn calculate_part_count(attributes: &Attributes) -> Result<f64> {
    get_part_count_lambda_b(
        attributes.get_id("subcategory_id")?,
        attributes.get_id("type_id")?,
        attributes.get_id("environment_active_id")?,
    )
}

pub fn get_environment_factor(subcategory_id: u32, environment_id: u32) -> Result<f64> {
    let table: &[f64] = match RelayKind::from_id(subcategory_id, "get_environment_factor")? {
        RelayKind::Mechanical => &PI_E_MECHANICAL,
        RelayKind::SolidState => &PI_E_SOLID_STATE,
    };
    get_by_id(table, environment_id, LookupContext::new(FAMILY, "get_environment_factor", "environment"))
}

pub fn get_part_count_quality_factor(subcategory_id: u32, quality_id: u32) -> Result<f64> {
    let table: &[f64] = match RelayKind::from_id(subcategory_id, "get_part_count_quality_factor")? {
        RelayKind::Mechanical => &PART_COUNT_PI_Q_MECHANICAL,
        RelayKind::SolidState => &PART_COUNT_PI_Q_SOLID_STATE,
    };
    get_by_id(table, quality_id, LookupContext::new(FAMILY, "get_part_count_quality_factor", "quality"))
}

pub fn get_part_stress_quality_factor(subcategory_id: u32, quality_id: u32) -> Result<f64> {
    let table: &[f64] = match RelayKind::from_id(subcategory_id, "get_part_stress_quality_factor")? {
        RelayKind::Mechanical => &PART_STRESS_PI_Q_MECHANICAL,
        RelayKind::SolidState => &PART_STRESS_PI_Q_SOLID_STATE,
    };
    get_by_id(table, quality_id, LookupContext::new(FAMILY, "get_part_stress_quality_factor", "quality"))
}

/// Mechanical relay base hazard rate; the curve depends on the rated
/// maximum temperature (85C or 125C parts)
pub fn calculate_mechanical_lambda_b(temperature_active: f64, temperature_rated_max: f64) -> f64 {
    let kelvin = temperature_active + 273.0;
    if temperature_rated_max <= 85.0 {
        0.0059 * (kelvin / 352.0).powf(15.7).exp()
    } else {
        0.0059 * (kelvin / 377.0).powf(10.4).exp()
    }
}

/// Cycling factor
///
/// Established reliability parts scale linearly with cycles per hour with a
/// floor of 0.1. Lower quality parts are 1.0 below 10 cycles/hour and
/// quadratic above 1000.
pub fn calculate_cycling_factor(quality_id: u32, n_cycles: f64) -> f64 {
    if quality_id <= ESTABLISHED_RELIABILITY_MAX_QUALITY {
        if n_cycles >= 1.0 {
            n_cycles / 10.0
        } else {
            0.1
        }
    } else if n_cycles > 1000.0 {
        (n_cycles / 100.0).powi(2)
    } else if n_cycles >= 10.0 {
        n_cycles / 10.0
    } else {
        1.0
    }
}

/// Mechanical relay part stress inputs
#[derive(Debug, Clone, PartialEq)]
pub struct MechanicalRelayStress {
    pub temperature_active: f64,
    pub temperature_rated_max: f64,
    pub current_ratio: f64,
    /// Load type: 1 resistive, 2 inductive, 3 lamp
    pub technology_id: u32,
    pub contact_form_id: u32,
    /// Cycles per hour
    pub n_cycles: f64,
    pub quality_id: u32,
    /// Construction factor; optional, defaults to 1.0
    pub pi_f: f64,
    pub pi_q: f64,
    pub pi_e: f64,
}

impl MechanicalRelayStress {
    pub fn from_attributes(attributes: &Attributes) -> Result<Self> {
        Ok(Self {
            temperature_active: attributes.get_f64("temperature_active")?,
            temperature_rated_max: attributes.get_f64("temperature_rated_max")?,
            current_ratio: attributes.get_ratio("current_ratio")?,
            technology_id: attributes.get_id("technology_id")?,
            contact_form_id: attributes.get_id("contact_form_id")?,
            n_cycles: attributes.get_f64("n_cycles")?,
            quality_id: attributes.get_id("quality_id")?,
            pi_f: attributes.get_f64_or("piF", 1.0)?,
            pi_q: attributes.get_f64("piQ")?,
            pi_e: attributes.get_f64("piE")?,
        })
    }
}

/// Solid state relay part stress inputs
#[derive(Debug, Clone, PartialEq)]
pub struct SolidStateRelayStress {
    pub type_id: u32,
    pub pi_q: f64,
    pub pi_e: f64,
}

impl SolidStateRelayStress {
    pub fn from_attributes(attributes: &Attributes) -> Result<Self> {
        Ok(Self {
            type_id: attributes.get_id("type_id")?,
            pi_q: attributes.get_f64("piQ")?,
            pi_e: attributes.get_f64("piE")?,
        })
    }
}

pub fn calculate_part_stress(attributes: &Attributes) -> Result<Attributes> {
    let mut out = attributes.clone();
    match RelayKind::from_id(attributes.get_id("subcategory_id")?, "calculate_part_stress")? {
        RelayKind::Mechanical => {
            let r = MechanicalRelayStress::from_attributes(attributes)?;
            let lambda_b = calculate_mechanical_lambda_b(r.temperature_active, r.temperature_rated_max);
            let pi_l = calculate_load_stress_factor(FAMILY, r.technology_id, r.current_ratio)?;
            let pi_c = get_by_id(
                &PI_C,
                r.contact_form_id,
                LookupContext::new(FAMILY, "calculate_part_stress", "contact form"),
            )?;
            let pi_cyc = calculate_cycling_factor(r.quality_id, r.n_cycles);
            let hazard_rate = lambda_b * pi_l * pi_c * pi_cyc * r.pi_f * r.pi_q * r.pi_e;
            tracing::debug!(family = FAMILY, lambda_b, pi_l, pi_c, pi_cyc, hazard_rate, "part stress");

            out.insert("lambda_b", lambda_b);
            out.insert("piL", pi_l);
            out.insert("piC", pi_c);
            out.insert("piCYC", pi_cyc);
            out.insert("piF", r.pi_f);
            out.insert("hazard_rate_active", hazard_rate);
        }
        RelayKind::SolidState => {
            let r = SolidStateRelayStress::from_attributes(attributes)?;
            let lambda_b = get_by_id(
                &LAMBDA_B_SOLID_STATE,
                r.type_id,
                LookupContext::new(FAMILY, "calculate_part_stress", "type"),
            )?;
            let hazard_rate = lambda_b * r.pi_q * r.pi_e;
            tracing::debug!(family = FAMILY, lambda_b, hazard_rate, "part stress");

            out.insert("lambda_b", lambda_b);
            out.insert("hazard_rate_active", hazard_rate);
        }
    }
    Ok(out)
}

/// Current ratio, then temperature margin below the rated maximum
pub fn do_derating_analysis(
    environment_id: u32,
    type_id: u32,
    limits: &StressLimits,
    attributes: &Attributes,
) -> Result<OverstressResult> {
    let load = LoadType::from_id(type_id, FAMILY)?;
    let tier = TierLimits::new(limits, vec![FAMILY, load.key()], environment_id, FAMILY);
    let current_limit = tier.get("current")?;
    let temperature_limit = tier.get("temperature")?;

    let current_ratio = attributes.get_ratio("current_ratio")?;
    let temperature_active = attributes.get_ratio("temperature_active")?;
    let temperature_rated_max = attributes.get_ratio("temperature_rated_max")?;

    let mut result = OverstressResult::default();
    result.record(check_current_limit(current_ratio, current_limit));
    result.record(check_temperature_limit(
        temperature_active,
        temperature_rated_max,
        temperature_limit,
    ));
    Ok(result)
}

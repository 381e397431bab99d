//! Hazard rate roll-up, MTBF and mission reliability
//!
//! Hazard rates throughout the crate are expressed in failures per
//! `hr_multiplier` hours (1e6 by default, i.e. failures per million hours).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::attributes::Attributes;
use crate::core::error::{ReliabilityError, Result};

/// Where the active hazard rate of an item comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardRateType {
    /// Predicted by a parts-count or part-stress calculation
    #[default]
    Assessed,
    /// A hazard rate supplied by the caller
    SpecifiedHazardRate,
    /// An MTBF supplied by the caller
    SpecifiedMtbf,
}

impl HazardRateType {
    pub fn from_id(id: u32) -> Result<Self> {
        match id {
            1 => Ok(HazardRateType::Assessed),
            2 => Ok(HazardRateType::SpecifiedHazardRate),
            3 => Ok(HazardRateType::SpecifiedMtbf),
            _ => Err(ReliabilityError::UnknownCategory {
                family: "hazard rate",
                operation: "HazardRateType::from_id",
                kind: "type",
                id,
            }),
        }
    }
}

impl fmt::Display for HazardRateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardRateType::Assessed => write!(f, "assessed"),
            HazardRateType::SpecifiedHazardRate => write!(f, "specified hazard rate"),
            HazardRateType::SpecifiedMtbf => write!(f, "specified MTBF"),
        }
    }
}

/// User adjustments applied to a predicted hazard rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardAdjustment {
    /// Added to the hazard rate before any multiplication
    pub add_adj_factor: f64,

    /// Multiplies the adjusted hazard rate
    pub mult_adj_factor: f64,

    /// Percent of mission time the item is operating
    pub duty_cycle: f64,

    /// Number of identical items
    pub quantity: u32,
}

impl Default for HazardAdjustment {
    fn default() -> Self {
        Self {
            add_adj_factor: 0.0,
            mult_adj_factor: 1.0,
            duty_cycle: 100.0,
            quantity: 1,
        }
    }
}

impl HazardAdjustment {
    /// Read the adjustment keys, defaulting any that are absent
    pub fn from_attributes(attributes: &Attributes) -> Result<Self> {
        let defaults = Self::default();
        let quantity = if attributes.contains_key("quantity") {
            attributes.get_id("quantity")?
        } else {
            defaults.quantity
        };
        Ok(Self {
            add_adj_factor: attributes.get_f64_or("add_adj_factor", defaults.add_adj_factor)?,
            mult_adj_factor: attributes.get_f64_or("mult_adj_factor", defaults.mult_adj_factor)?,
            duty_cycle: attributes.get_f64_or("duty_cycle", defaults.duty_cycle)?,
            quantity,
        })
    }
}

/// `(hr + add) * mult * duty/100 * quantity`
pub fn calculate_hazard_rate_active(hazard_rate: f64, adjustment: &HazardAdjustment) -> f64 {
    (hazard_rate + adjustment.add_adj_factor)
        * adjustment.mult_adj_factor
        * (adjustment.duty_cycle / 100.0)
        * f64::from(adjustment.quantity)
}

/// Hazard rate implied by a specified MTBF (in hours)
pub fn calculate_hazard_rate_from_mtbf(mtbf: f64, hr_multiplier: f64) -> Result<f64> {
    if mtbf <= 0.0 || mtbf.is_nan() {
        return Err(ReliabilityError::InvalidParameter {
            name: "mtbf_specified",
            value: mtbf,
            reason: "must be greater than zero",
        });
    }
    Ok(hr_multiplier / mtbf)
}

/// Logistics hazard rate: every failure counts
pub fn calculate_hazard_rate_logistics(active: f64, dormant: f64, software: f64) -> f64 {
    active + dormant + software
}

/// Mission hazard rate: active while operating, dormant otherwise
pub fn calculate_hazard_rate_mission(
    active: f64,
    dormant: f64,
    software: f64,
    duty_cycle: f64,
) -> f64 {
    let duty = duty_cycle / 100.0;
    active * duty + dormant * (1.0 - duty) + software
}

/// MTBF in hours for a hazard rate in failures per `hr_multiplier` hours
pub fn calculate_mtbf(hazard_rate: f64, hr_multiplier: f64) -> Result<f64> {
    if hazard_rate <= 0.0 || hazard_rate.is_nan() {
        return Err(ReliabilityError::InvalidParameter {
            name: "hazard rate",
            value: hazard_rate,
            reason: "must be greater than zero to compute an MTBF",
        });
    }
    Ok(hr_multiplier / hazard_rate)
}

/// Probability of surviving `mission_time` hours at a constant hazard rate
pub fn calculate_reliability(hazard_rate: f64, hr_multiplier: f64, mission_time: f64) -> f64 {
    (-(hazard_rate / hr_multiplier) * mission_time).exp()
}

/// Roll a calculated item up into logistics and mission metrics
///
/// Reads `hazard_rate_type_id` (default assessed), the adjustment factors,
/// `hazard_rate_dormant`/`hazard_rate_software` (default 0) and
/// `mission_time` (default 100 h).
pub fn calculate_reliability_metrics(attributes: &Attributes, hr_multiplier: f64) -> Result<Attributes> {
    let rate_type = if attributes.contains_key("hazard_rate_type_id") {
        HazardRateType::from_id(attributes.get_id("hazard_rate_type_id")?)?
    } else {
        HazardRateType::default()
    };
    let adjustment = HazardAdjustment::from_attributes(attributes)?;

    let base = match rate_type {
        HazardRateType::Assessed => attributes.get_f64("hazard_rate_active")?,
        HazardRateType::SpecifiedHazardRate => attributes.get_f64("hazard_rate_specified")?,
        HazardRateType::SpecifiedMtbf => {
            calculate_hazard_rate_from_mtbf(attributes.get_f64("mtbf_specified")?, hr_multiplier)?
        }
    };
    let active = calculate_hazard_rate_active(base, &adjustment);
    let dormant = attributes.get_f64_or("hazard_rate_dormant", 0.0)?;
    let software = attributes.get_f64_or("hazard_rate_software", 0.0)?;
    let mission_time = attributes.get_f64_or("mission_time", 100.0)?;

    let logistics = calculate_hazard_rate_logistics(active, dormant, software);
    let mission = calculate_hazard_rate_mission(active, dormant, software, adjustment.duty_cycle);

    tracing::debug!(%rate_type, active, logistics, mission, "rolled up hazard rates");

    let mut out = attributes.clone();
    out.insert("hazard_rate_active", active);
    out.insert("hazard_rate_logistics", logistics);
    out.insert("hazard_rate_mission", mission);
    out.insert("mtbf_logistics", calculate_mtbf(logistics, hr_multiplier)?);
    out.insert("mtbf_mission", calculate_mtbf(mission, hr_multiplier)?);
    out.insert(
        "reliability_logistics",
        calculate_reliability(logistics, hr_multiplier, mission_time),
    );
    out.insert(
        "reliability_mission",
        calculate_reliability(mission, hr_multiplier, mission_time),
    );
    Ok(out)
}

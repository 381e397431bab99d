//! Part families and the category dispatcher
//!
//! Each family module owns its lookup tables and exposes the same set of
//! operations. The functions here pick the family from `category_id` and
//! forward to it.

pub mod miscellaneous;
pub mod relay;
pub mod resistor;
pub mod switch;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::derating::OverstressResult;
use crate::core::attributes::Attributes;
use crate::core::environment::severity_tier;
use crate::core::error::{ReliabilityError, Result};
use crate::core::limits::StressLimits;
use crate::core::lookup::{get_by_id, LookupContext};

/// Load stress constant `k` by load type: resistive, inductive, lamp
pub const LOAD_STRESS_K: [f64; 3] = [0.8, 0.4, 0.2];

/// Contact load stress factor `πL = exp((S/k)^2)` shared by relays and switches
pub fn calculate_load_stress_factor(
    family: &'static str,
    technology_id: u32,
    stress_ratio: f64,
) -> Result<f64> {
    let k = get_by_id(
        &LOAD_STRESS_K,
        technology_id,
        LookupContext::new(family, "calculate_part_stress", "technology"),
    )?;
    Ok((stress_ratio / k).powi(2).exp())
}

/// MIL-HDBK-217F part categories with calculators in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Resistor,
    Relay,
    Switch,
    Miscellaneous,
}

impl Category {
    pub fn from_id(category_id: u32, operation: &'static str) -> Result<Self> {
        match category_id {
            3 => Ok(Category::Resistor),
            6 => Ok(Category::Relay),
            7 => Ok(Category::Switch),
            10 => Ok(Category::Miscellaneous),
            id => Err(ReliabilityError::UnknownCategory {
                family: "part",
                operation,
                kind: "category",
                id,
            }),
        }
    }

    pub fn id(self) -> u32 {
        match self {
            Category::Resistor => 3,
            Category::Relay => 6,
            Category::Switch => 7,
            Category::Miscellaneous => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Resistor => "resistor",
            Category::Relay => "relay",
            Category::Switch => "switch",
            Category::Miscellaneous => "miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn category_of(attributes: &Attributes, operation: &'static str) -> Result<Category> {
    Category::from_id(attributes.get_id("category_id")?, operation)
}

pub fn get_environment_factor(category_id: u32, subcategory_id: u32, environment_id: u32) -> Result<f64> {
    match Category::from_id(category_id, "get_environment_factor")? {
        Category::Resistor => resistor::get_environment_factor(subcategory_id, environment_id),
        Category::Relay => relay::get_environment_factor(subcategory_id, environment_id),
        Category::Switch => switch::get_environment_factor(subcategory_id, environment_id),
        Category::Miscellaneous => miscellaneous::get_environment_factor(subcategory_id, environment_id),
    }
}

pub fn get_part_count_quality_factor(category_id: u32, subcategory_id: u32, quality_id: u32) -> Result<f64> {
    match Category::from_id(category_id, "get_part_count_quality_factor")? {
        Category::Resistor => resistor::get_part_count_quality_factor(subcategory_id, quality_id),
        Category::Relay => relay::get_part_count_quality_factor(subcategory_id, quality_id),
        Category::Switch => switch::get_part_count_quality_factor(subcategory_id, quality_id),
        Category::Miscellaneous => {
            miscellaneous::get_part_count_quality_factor(subcategory_id, quality_id)
        }
    }
}

pub fn get_part_stress_quality_factor(category_id: u32, subcategory_id: u32, quality_id: u32) -> Result<f64> {
    match Category::from_id(category_id, "get_part_stress_quality_factor")? {
        Category::Resistor => resistor::get_part_stress_quality_factor(subcategory_id, quality_id),
        Category::Relay => relay::get_part_stress_quality_factor(subcategory_id, quality_id),
        Category::Switch => switch::get_part_stress_quality_factor(subcategory_id, quality_id),
        Category::Miscellaneous => {
            miscellaneous::get_part_stress_quality_factor(subcategory_id, quality_id)
        }
    }
}

/// Parts count prediction
///
/// Reads `category_id`, `subcategory_id`, `environment_active_id`,
/// `quality_id` and the family's discriminants. The result carries
/// `lambda_b`, `piQ` and `hazard_rate_active = lambda_b * piQ`.
pub fn calculate_part_count(attributes: &Attributes) -> Result<Attributes> {
    let category = category_of(attributes, "calculate_part_count")?;
    let subcategory_id = attributes.get_id("subcategory_id")?;
    let lambda_b = match category {
        Category::Resistor => resistor::calculate_part_count(attributes)?,
        Category::Relay => relay::calculate_part_count(attributes)?,
        Category::Switch => switch::calculate_part_count(attributes)?,
        Category::Miscellaneous => miscellaneous::calculate_part_count(attributes)?,
    };
    let pi_q = get_part_count_quality_factor(
        category.id(),
        subcategory_id,
        attributes.get_id("quality_id")?,
    )?;
    let hazard_rate = lambda_b * pi_q;
    tracing::debug!(%category, subcategory_id, lambda_b, pi_q, hazard_rate, "part count");

    let mut out = attributes.clone();
    out.insert("lambda_b", lambda_b);
    out.insert("piQ", pi_q);
    out.insert("hazard_rate_active", hazard_rate);
    Ok(out)
}

/// Part stress prediction
///
/// `piQ` and `piE` are looked up from `quality_id` and
/// `environment_active_id` unless the caller already supplied them.
/// Resistors get their nominal defaults applied first.
pub fn calculate_part_stress(attributes: &Attributes) -> Result<Attributes> {
    let category = category_of(attributes, "calculate_part_stress")?;
    let subcategory_id = attributes.get_id("subcategory_id")?;

    let mut request = match category {
        Category::Resistor => resistor::set_default_values(attributes)?,
        _ => attributes.clone(),
    };
    if !request.contains_key("piQ") {
        let pi_q = get_part_stress_quality_factor(
            category.id(),
            subcategory_id,
            attributes.get_id("quality_id")?,
        )?;
        request.insert("piQ", pi_q);
    }
    if !request.contains_key("piE") {
        let pi_e = get_environment_factor(
            category.id(),
            subcategory_id,
            attributes.get_id("environment_active_id")?,
        )?;
        request.insert("piE", pi_e);
    }

    match category {
        Category::Resistor => resistor::calculate_part_stress(&request),
        Category::Relay => relay::calculate_part_stress(&request),
        Category::Switch => switch::calculate_part_stress(&request),
        Category::Miscellaneous => miscellaneous::calculate_part_stress(&request),
    }
}

/// Derating analysis against `limits`
///
/// The severity tier comes from `environment_active_id`. Relays and
/// switches are discriminated by `type_id` (load type), every other
/// family by `subcategory_id`.
pub fn do_derating_analysis(attributes: &Attributes, limits: &StressLimits) -> Result<OverstressResult> {
    let category = category_of(attributes, "do_derating_analysis")?;
    let tier = severity_tier(attributes.get_id("environment_active_id")?, category.name())?;

    let result = match category {
        Category::Resistor => resistor::do_derating_analysis(
            tier,
            attributes.get_id("subcategory_id")?,
            limits,
            attributes,
        )?,
        Category::Relay => {
            relay::do_derating_analysis(tier, attributes.get_id("type_id")?, limits, attributes)?
        }
        Category::Switch => {
            switch::do_derating_analysis(tier, attributes.get_id("type_id")?, limits, attributes)?
        }
        Category::Miscellaneous => miscellaneous::do_derating_analysis(
            tier,
            attributes.get_id("subcategory_id")?,
            limits,
            attributes,
        )?,
    };
    tracing::debug!(%category, tier, overstress = result.overstress, "derating analysis");
    Ok(result)
}

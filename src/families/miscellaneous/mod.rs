//! Miscellaneous parts: crystals, filters, fuses and lamps

pub mod crystal;
pub mod filter;
pub mod fuse;
pub mod lamp;

use crate::analysis::derating::{check_severity_tier, OverstressResult};
use crate::core::attributes::Attributes;
use crate::core::error::{ReliabilityError, Result};
use crate::core::limits::StressLimits;
use crate::core::lookup::{get_by_id, LookupContext};

const FAMILY: &str = "miscellaneous";

/// Miscellaneous subcategories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscPart {
    Crystal,
    Filter,
    Fuse,
    Lamp,
}

impl MiscPart {
    pub fn from_id(subcategory_id: u32, operation: &'static str) -> Result<Self> {
        match subcategory_id {
            1 => Ok(MiscPart::Crystal),
            2 => Ok(MiscPart::Filter),
            3 => Ok(MiscPart::Fuse),
            4 => Ok(MiscPart::Lamp),
            id => Err(ReliabilityError::UnknownCategory {
                family: FAMILY,
                operation,
                kind: "subcategory",
                id,
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MiscPart::Crystal => "crystal",
            MiscPart::Filter => "filter",
            MiscPart::Fuse => "fuse",
            MiscPart::Lamp => "lamp",
        }
    }

    fn part_count_pi_q(self) -> &'static [f64] {
        match self {
            MiscPart::Crystal => &crystal::PART_COUNT_PI_Q,
            MiscPart::Filter => &filter::PART_COUNT_PI_Q,
            MiscPart::Fuse => &fuse::PART_COUNT_PI_Q,
            MiscPart::Lamp => &lamp::PART_COUNT_PI_Q,
        }
    }

    fn part_stress_pi_q(self) -> &'static [f64] {
        match self {
            MiscPart::Crystal => &crystal::PART_STRESS_PI_Q,
            MiscPart::Filter => &filter::PART_STRESS_PI_Q,
            MiscPart::Fuse => &fuse::PART_STRESS_PI_Q,
            MiscPart::Lamp => &lamp::PART_STRESS_PI_Q,
        }
    }
}

pub fn calculate_part_count(attributes: &Attributes) -> Result<f64> {
    match MiscPart::from_id(attributes.get_id("subcategory_id")?, "calculate_part_count")? {
        MiscPart::Crystal => crystal::calculate_part_count(attributes),
        MiscPart::Filter => filter::calculate_part_count(attributes),
        MiscPart::Fuse => fuse::calculate_part_count(attributes),
        MiscPart::Lamp => lamp::calculate_part_count(attributes),
    }
}

pub fn calculate_part_stress(attributes: &Attributes) -> Result<Attributes> {
    match MiscPart::from_id(attributes.get_id("subcategory_id")?, "calculate_part_stress")? {
        MiscPart::Crystal => crystal::calculate_part_stress(attributes),
        MiscPart::Filter => filter::calculate_part_stress(attributes),
        MiscPart::Fuse => fuse::calculate_part_stress(attributes),
        MiscPart::Lamp => lamp::calculate_part_stress(attributes),
    }
}

pub fn get_environment_factor(subcategory_id: u32, environment_id: u32) -> Result<f64> {
    match MiscPart::from_id(subcategory_id, "get_environment_factor")? {
        MiscPart::Crystal => crystal::get_environment_factor(environment_id),
        MiscPart::Filter => filter::get_environment_factor(environment_id),
        MiscPart::Fuse => fuse::get_environment_factor(environment_id),
        MiscPart::Lamp => lamp::get_environment_factor(environment_id),
    }
}

pub fn get_part_count_quality_factor(subcategory_id: u32, quality_id: u32) -> Result<f64> {
    let part = MiscPart::from_id(subcategory_id, "get_part_count_quality_factor")?;
    get_by_id(
        part.part_count_pi_q(),
        quality_id,
        LookupContext::new(part.name(), "get_part_count_quality_factor", "quality"),
    )
}

pub fn get_part_stress_quality_factor(subcategory_id: u32, quality_id: u32) -> Result<f64> {
    let part = MiscPart::from_id(subcategory_id, "get_part_stress_quality_factor")?;
    get_by_id(
        part.part_stress_pi_q(),
        quality_id,
        LookupContext::new(part.name(), "get_part_stress_quality_factor", "quality"),
    )
}

/// Only lamps carry tabulated limits; the other parts validate the tier
pub fn do_derating_analysis(
    environment_id: u32,
    subcategory_id: u32,
    limits: &StressLimits,
    attributes: &Attributes,
) -> Result<OverstressResult> {
    let part = MiscPart::from_id(subcategory_id, "do_derating_analysis")?;
    match part {
        MiscPart::Lamp => lamp::do_derating_analysis(environment_id, limits, attributes),
        other => {
            check_severity_tier(environment_id, other.name())?;
            Ok(OverstressResult::default())
        }
    }
}

//! Shared derating checks
//!
//! Every family's `do_derating_analysis` is a fixed sequence of these checks.
//! Each check returns the sentence to append when the value exceeds its
//! limit, so the order of calls is the order of the reported reasons.

use serde::{Deserialize, Serialize};

use crate::core::environment::SEVERITY_TIERS;
use crate::core::error::Result;
use crate::core::limits::StressLimits;
use crate::core::lookup::{get_by_id, LookupContext};

/// Outcome of a derating analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverstressResult {
    /// True when at least one stress exceeds its limit
    pub overstress: bool,

    /// One sentence per violated dimension, in check order
    pub reason: String,
}

impl OverstressResult {
    /// 0 or 1
    pub fn flag(&self) -> u8 {
        u8::from(self.overstress)
    }

    /// `(flag, reason)` pair
    pub fn as_tuple(&self) -> (u8, &str) {
        (self.flag(), &self.reason)
    }

    /// Append a finding from one of the `check_*` functions
    pub fn record(&mut self, finding: Option<String>) {
        if let Some(sentence) = finding {
            self.overstress = true;
            self.reason.push_str(&sentence);
        }
    }
}

/// Limits for one resolved family/application at one severity tier
pub struct TierLimits<'a> {
    limits: &'a StressLimits,
    path: Vec<&'a str>,
    environment_id: u32,
    ctx: LookupContext,
}

impl<'a> TierLimits<'a> {
    pub fn new(
        limits: &'a StressLimits,
        path: Vec<&'a str>,
        environment_id: u32,
        family: &'static str,
    ) -> Self {
        Self {
            limits,
            path,
            environment_id,
            ctx: LookupContext::new(family, "do_derating_analysis", "severity tier"),
        }
    }

    /// Limit for `stress`; a missing table entry is an error
    pub fn get(&self, stress: &'a str) -> Result<f64> {
        let mut path = self.path.clone();
        path.push(stress);
        self.limits.limit(&path, self.environment_id, self.ctx)
    }

    /// Limit for `stress` if the table defines one
    pub fn get_optional(&self, stress: &'a str) -> Result<Option<f64>> {
        if self.limits.has_child(&self.path, stress) {
            self.get(stress).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Reject severity tiers outside `1..=3` for families without tabulated limits
pub fn check_severity_tier(environment_id: u32, family: &'static str) -> Result<()> {
    let tiers = [(); SEVERITY_TIERS];
    get_by_id(
        &tiers,
        environment_id,
        LookupContext::new(family, "do_derating_analysis", "severity tier"),
    )
}

/// Generic ratio check
pub fn check_ratio_limit(dimension: &str, ratio: f64, limit: f64) -> Option<String> {
    (ratio > limit).then(|| {
        format!(
            "{} ratio of {:?} exceeds the allowable limit of {:?}.\n",
            dimension, ratio, limit
        )
    })
}

pub fn check_current_limit(current_ratio: f64, limit: f64) -> Option<String> {
    check_ratio_limit("Current", current_ratio, limit)
}

pub fn check_power_limit(power_ratio: f64, limit: f64) -> Option<String> {
    check_ratio_limit("Power", power_ratio, limit)
}

pub fn check_voltage_limit(voltage_ratio: f64, limit: f64) -> Option<String> {
    check_ratio_limit("Voltage", voltage_ratio, limit)
}

/// Temperature check with two limit conventions
///
/// A limit below 1.0 is a fraction of the maximum rated temperature. A limit
/// of 1.0 or more is a margin in degrees below it.
pub fn check_temperature_limit(
    temperature_active: f64,
    temperature_rated_max: f64,
    limit: f64,
) -> Option<String> {
    if limit < 1.0 {
        let allowed = limit * temperature_rated_max;
        (temperature_active > allowed).then(|| {
            format!(
                "Temperature of {:?}C exceeds the derated maximum temperature of {:?}C.\n",
                temperature_active, allowed
            )
        })
    } else {
        (temperature_active > temperature_rated_max - limit).then(|| {
            format!(
                "Temperature of {:?}C exceeds the derated maximum temperature of {:?}C less than maximum rated temperature of {:?}C.\n",
                temperature_active, limit, temperature_rated_max
            )
        })
    }
}

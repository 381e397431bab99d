//! MIL-HDBK-217F operating environments

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::Result;
use crate::core::lookup::{get_by_id, LookupContext};

/// Number of environments every πE / part-count table is indexed by
pub const ENVIRONMENT_COUNT: usize = 14;

/// Number of derating severity tiers in a stress limit table
pub const SEVERITY_TIERS: usize = 3;

/// The fourteen environments, in handbook order (ID 1 = GB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    /// Ground, benign
    Gb,
    /// Ground, fixed
    Gf,
    /// Ground, mobile
    Gm,
    /// Naval, sheltered
    Ns,
    /// Naval, unsheltered
    Nu,
    /// Airborne, inhabited, cargo
    Aic,
    /// Airborne, inhabited, fighter
    Aif,
    /// Airborne, uninhabited, cargo
    Auc,
    /// Airborne, uninhabited, fighter
    Auf,
    /// Airborne, rotary winged
    Arw,
    /// Space, flight
    Sf,
    /// Missile, flight
    Mf,
    /// Missile, launch
    Ml,
    /// Cannon, launch
    Cl,
}

const ALL: [Environment; ENVIRONMENT_COUNT] = [
    Environment::Gb,
    Environment::Gf,
    Environment::Gm,
    Environment::Ns,
    Environment::Nu,
    Environment::Aic,
    Environment::Aif,
    Environment::Auc,
    Environment::Auf,
    Environment::Arw,
    Environment::Sf,
    Environment::Mf,
    Environment::Ml,
    Environment::Cl,
];

impl Environment {
    pub fn from_id(id: u32) -> Result<Self> {
        get_by_id(
            &ALL,
            id,
            LookupContext::new("part", "Environment::from_id", "environment"),
        )
    }

    pub fn id(self) -> u32 {
        ALL.iter().position(|e| *e == self).map_or(0, |p| p as u32 + 1)
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Environment::Gb => "GB",
            Environment::Gf => "GF",
            Environment::Gm => "GM",
            Environment::Ns => "NS",
            Environment::Nu => "NU",
            Environment::Aic => "AIC",
            Environment::Aif => "AIF",
            Environment::Auc => "AUC",
            Environment::Auf => "AUF",
            Environment::Arw => "ARW",
            Environment::Sf => "SF",
            Environment::Mf => "MF",
            Environment::Ml => "ML",
            Environment::Cl => "CL",
        }
    }

    /// Derating severity tier (1 protected, 2 normal, 3 severe)
    pub fn severity_tier(self) -> u32 {
        match self {
            Environment::Gb | Environment::Sf => 1,
            Environment::Gf | Environment::Ns | Environment::Aic | Environment::Auc => 2,
            _ => 3,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Severity tier for the active environment of a `family` part under derating
pub fn severity_tier(environment_active_id: u32, family: &'static str) -> Result<u32> {
    get_by_id(
        &ALL,
        environment_active_id,
        LookupContext::new(family, "do_derating_analysis", "environment"),
    )
    .map(Environment::severity_tier)
}

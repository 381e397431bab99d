//! Switches (MIL-HDBK-217F sections 14.1 through 14.5)
//!
//! | ID | Switch                  | Part stress |
//! |----|-------------------------|-------------|
//! | 1  | toggle or pushbutton    | yes         |
//! | 2  | basic sensitive         | no          |
//! | 3  | rotary                  | no          |
//! | 4  | thumbwheel              | no          |
//! | 5  | circuit breaker         | yes         |

use crate::analysis::derating::{check_current_limit, check_power_limit, OverstressResult, TierLimits};
use crate::core::attributes::Attributes;
use crate::core::error::{ReliabilityError, Result};
use crate::core::limits::StressLimits;
use crate::core::lookup::{get_by_id, LookupContext};
use crate::families::calculate_load_stress_factor;
use crate::families::relay::LoadType;

const FAMILY: &str = "switch";

pub const PART_COUNT_LAMBDA_B: [[f64; 14]; 5] = [
    [0.001, 0.003, 0.018, 0.008, 0.029, 0.010, 0.018, 0.013, 0.022, 0.046, 0.0005, 0.025, 0.067, 1.2],
    [0.15, 0.44, 2.7, 1.2, 4.3, 1.5, 2.7, 1.9, 3.3, 6.8, 0.074, 3.7, 9.9, 180.0],
    [0.33, 0.99, 5.9, 2.6, 9.5, 3.3, 5.9, 4.3, 7.2, 15.0, 0.16, 8.2, 22.0, 390.0],
    [0.56, 1.7, 10.0, 4.5, 16.0, 5.6, 10.0, 7.3, 12.0, 26.0, 0.26, 14.0, 38.0, 670.0],
    [0.11, 0.23, 1.7, 0.91, 3.1, 0.8, 1.0, 1.3, 1.4, 5.2, 0.057, 2.8, 7.5, 0.0],
];

pub const PART_COUNT_PI_Q_SWITCH: [f64; 2] = [1.0, 20.0];
pub const PART_COUNT_PI_Q_BREAKER: [f64; 2] = [1.0, 8.4];

/// Switch quality is carried in λb, so its part stress πQ is unity
pub const PART_STRESS_PI_Q_SWITCH: [f64; 2] = [1.0, 1.0];
pub const PART_STRESS_PI_Q_BREAKER: [f64; 2] = [1.0, 8.4];

pub const PI_E_SWITCH: [f64; 14] = [
    1.0, 3.0, 18.0, 8.0, 29.0, 10.0, 18.0, 13.0, 22.0, 46.0, 0.5, 25.0, 67.0, 1200.0,
];
pub const PI_E_BREAKER: [f64; 14] = [
    1.0, 2.0, 15.0, 8.0, 27.0, 7.0, 9.0, 11.0, 12.0, 46.0, 0.5, 25.0, 66.0, 0.0,
];

/// Toggle base hazard rate: 1 MIL-SPEC, 2 lower quality
pub const LAMBDA_B_TOGGLE: [f64; 2] = [0.00045, 0.034];

pub const PI_C_TOGGLE: [f64; 9] = [1.0, 1.5, 1.7, 2.0, 2.5, 3.0, 4.2, 5.5, 8.0];

/// Breaker base hazard rate by type: magnetic, thermal, thermal-magnetic
pub const LAMBDA_B_BREAKER: [f64; 3] = [0.02, 0.038, 0.038];

/// Breaker configuration: SPST, DPST, 3PST, 4PST
pub const PI_C_BREAKER: [f64; 4] = [1.0, 2.0, 3.0, 4.0];

/// Breaker use: 1 not used as a power on/off switch, 2 also used as one
pub const PI_U_BREAKER: [f64; 2] = [1.0, 10.0];

/// Switch subcategories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchKind {
    Toggle,
    Sensitive,
    Rotary,
    Thumbwheel,
    Breaker,
}

impl SwitchKind {
    pub fn from_id(subcategory_id: u32, operation: &'static str) -> Result<Self> {
        match subcategory_id {
            1 => Ok(SwitchKind::Toggle),
            2 => Ok(SwitchKind::Sensitive),
            3 => Ok(SwitchKind::Rotary),
            4 => Ok(SwitchKind::Thumbwheel),
            5 => Ok(SwitchKind::Breaker),
            id => Err(unknown_subcategory(operation, id)),
        }
    }

    fn is_breaker(self) -> bool {
        self == SwitchKind::Breaker
    }
}

fn unknown_subcategory(operation: &'static str, id: u32) -> ReliabilityError {
    ReliabilityError::UnknownCategory {
        family: FAMILY,
        operation,
        kind: "subcategory",
        id,
    }
}

pub fn get_part_count_lambda_b(subcategory_id: u32, environment_id: u32) -> Result<f64> {
    SwitchKind::from_id(subcategory_id, "get_part_count_lambda_b")?;
    let row = get_by_id(
        &PART_COUNT_LAMBDA_B,
        subcategory_id,
        LookupContext::new(FAMILY, "get_part_count_lambda_b", "subcategory"),
    )?;
    get_by_id(
        &row,
        environment_id,
        LookupContext::new(FAMILY, "get_part_count_lambda_b", "environment"),
    )
}

pub fn calculate_part_count(attributes: &Attributes) -> Result<f64> {
    get_part_count_lambda_b(
        attributes.get_id("subcategory_id")?,
        attributes.get_id("environment_active_id")?,
    )
}

pub fn get_environment_factor(subcategory_id: u32, environment_id: u32) -> Result<f64> {
    let kind = SwitchKind::from_id(subcategory_id, "get_environment_factor")?;
    let table: &[f64] = if kind.is_breaker() { &PI_E_BREAKER } else { &PI_E_SWITCH };
    get_by_id(table, environment_id, LookupContext::new(FAMILY, "get_environment_factor", "environment"))
}

pub fn get_part_count_quality_factor(subcategory_id: u32, quality_id: u32) -> Result<f64> {
    let kind = SwitchKind::from_id(subcategory_id, "get_part_count_quality_factor")?;
    let table: &[f64] = if kind.is_breaker() {
        &PART_COUNT_PI_Q_BREAKER
    } else {
        &PART_COUNT_PI_Q_SWITCH
    };
    get_by_id(table, quality_id, LookupContext::new(FAMILY, "get_part_count_quality_factor", "quality"))
}

pub fn get_part_stress_quality_factor(subcategory_id: u32, quality_id: u32) -> Result<f64> {
    let kind = SwitchKind::from_id(subcategory_id, "get_part_stress_quality_factor")?;
    let table: &[f64] = if kind.is_breaker() {
        &PART_STRESS_PI_Q_BREAKER
    } else {
        &PART_STRESS_PI_Q_SWITCH
    };
    get_by_id(table, quality_id, LookupContext::new(FAMILY, "get_part_stress_quality_factor", "quality"))
}

/// Cycles per hour, floored at one
pub fn calculate_cycling_factor(n_cycles: f64) -> f64 {
    if n_cycles <= 1.0 {
        1.0
    } else {
        n_cycles
    }
}

/// Toggle or pushbutton part stress inputs
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleStress {
    pub quality_id: u32,
    pub n_cycles: f64,
    /// Load type: 1 resistive, 2 inductive, 3 lamp
    pub application_id: u32,
    pub current_ratio: f64,
    pub contact_form_id: u32,
    pub pi_e: f64,
}

impl ToggleStress {
    pub fn from_attributes(attributes: &Attributes) -> Result<Self> {
        Ok(Self {
            quality_id: attributes.get_id("quality_id")?,
            n_cycles: attributes.get_f64("n_cycles")?,
            application_id: attributes.get_id("application_id")?,
            current_ratio: attributes.get_ratio("current_ratio")?,
            contact_form_id: attributes.get_id("contact_form_id")?,
            pi_e: attributes.get_f64("piE")?,
        })
    }
}

/// Circuit breaker part stress inputs
#[derive(Debug, Clone, PartialEq)]
pub struct BreakerStress {
    pub type_id: u32,
    pub contact_form_id: u32,
    pub use_id: u32,
    pub pi_q: f64,
    pub pi_e: f64,
}

impl BreakerStress {
    pub fn from_attributes(attributes: &Attributes) -> Result<Self> {
        Ok(Self {
            type_id: attributes.get_id("type_id")?,
            contact_form_id: attributes.get_id("contact_form_id")?,
            use_id: attributes.get_id("use_id")?,
            pi_q: attributes.get_f64("piQ")?,
            pi_e: attributes.get_f64("piE")?,
        })
    }
}

fn lookup(table: &[f64], id: u32, name: &'static str) -> Result<f64> {
    get_by_id(table, id, LookupContext::new(FAMILY, "calculate_part_stress", name))
}

/// Part stress for toggles and breakers; the other styles are parts count only
pub fn calculate_part_stress(attributes: &Attributes) -> Result<Attributes> {
    let subcategory_id = attributes.get_id("subcategory_id")?;
    let mut out = attributes.clone();
    match SwitchKind::from_id(subcategory_id, "calculate_part_stress")? {
        SwitchKind::Toggle => {
            let r = ToggleStress::from_attributes(attributes)?;
            let lambda_b = lookup(&LAMBDA_B_TOGGLE, r.quality_id, "quality")?;
            let pi_cyc = calculate_cycling_factor(r.n_cycles);
            let pi_l = calculate_load_stress_factor(FAMILY, r.application_id, r.current_ratio)?;
            let pi_c = lookup(&PI_C_TOGGLE, r.contact_form_id, "contact form")?;
            let hazard_rate = lambda_b * pi_cyc * pi_l * pi_c * r.pi_e;
            tracing::debug!(family = FAMILY, lambda_b, pi_cyc, pi_l, pi_c, hazard_rate, "part stress");

            out.insert("lambda_b", lambda_b);
            out.insert("piCYC", pi_cyc);
            out.insert("piL", pi_l);
            out.insert("piC", pi_c);
            out.insert("hazard_rate_active", hazard_rate);
        }
        SwitchKind::Breaker => {
            let r = BreakerStress::from_attributes(attributes)?;
            let lambda_b = lookup(&LAMBDA_B_BREAKER, r.type_id, "type")?;
            let pi_c = lookup(&PI_C_BREAKER, r.contact_form_id, "contact form")?;
            let pi_u = lookup(&PI_U_BREAKER, r.use_id, "use")?;
            let hazard_rate = lambda_b * pi_c * pi_u * r.pi_q * r.pi_e;
            tracing::debug!(family = FAMILY, lambda_b, pi_c, pi_u, hazard_rate, "part stress");

            out.insert("lambda_b", lambda_b);
            out.insert("piC", pi_c);
            out.insert("piU", pi_u);
            out.insert("hazard_rate_active", hazard_rate);
        }
        SwitchKind::Sensitive | SwitchKind::Rotary | SwitchKind::Thumbwheel => {
            return Err(unknown_subcategory("calculate_part_stress", subcategory_id));
        }
    }
    Ok(out)
}

/// Current ratio, then power ratio
pub fn do_derating_analysis(
    environment_id: u32,
    type_id: u32,
    limits: &StressLimits,
    attributes: &Attributes,
) -> Result<OverstressResult> {
    let load = LoadType::from_id(type_id, FAMILY)?;
    let tier = TierLimits::new(limits, vec![FAMILY, load.key()], environment_id, FAMILY);
    let current_limit = tier.get("current")?;
    let power_limit = tier.get("power")?;

    let current_ratio = attributes.get_ratio("current_ratio")?;
    let power_ratio = attributes.get_ratio("power_ratio")?;

    let mut result = OverstressResult::default();
    result.record(check_current_limit(current_ratio, current_limit));
    result.record(check_power_limit(power_ratio, power_limit));
    Ok(result)
}

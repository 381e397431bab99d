//! Life distributions: hazard rate, MTBF and survival
//!
//! Parameters follow the usual location/scale/shape convention:
//!
//! | Distribution | shape | location | scale |
//! |--------------|-------|----------|-------|
//! | exponential  | -     | γ        | 1/λ   |
//! | lognormal    | σ     | γ        | e^μ   |
//! | normal       | -     | μ        | σ     |
//! | weibull      | β     | γ        | η     |

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{ReliabilityError, Result};

/// Supported life distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionType {
    Exponential,
    Lognormal,
    Normal,
    Weibull,
}

impl FromStr for DistributionType {
    type Err = ReliabilityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "exponential" => Ok(DistributionType::Exponential),
            "lognormal" => Ok(DistributionType::Lognormal),
            "normal" => Ok(DistributionType::Normal),
            "weibull" => Ok(DistributionType::Weibull),
            _ => Err(ReliabilityError::UnsupportedDistribution {
                dist_type: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DistributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionType::Exponential => write!(f, "exponential"),
            DistributionType::Lognormal => write!(f, "lognormal"),
            DistributionType::Normal => write!(f, "normal"),
            DistributionType::Weibull => write!(f, "weibull"),
        }
    }
}

/// Shape, location and scale of a distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    pub shape: f64,
    pub location: f64,
    pub scale: f64,
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self {
            shape: 1.0,
            location: 0.0,
            scale: 1.0,
        }
    }
}

/// A validated distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    kind: DistributionType,
    params: DistributionParams,
}

impl Distribution {
    pub fn new(kind: DistributionType, params: DistributionParams) -> Result<Self> {
        if !(params.scale > 0.0) || !params.scale.is_finite() {
            return Err(ReliabilityError::InvalidParameter {
                name: "scale",
                value: params.scale,
                reason: "must be a finite number greater than zero",
            });
        }
        let uses_shape = matches!(kind, DistributionType::Lognormal | DistributionType::Weibull);
        if uses_shape && (!(params.shape > 0.0) || !params.shape.is_finite()) {
            return Err(ReliabilityError::InvalidParameter {
                name: "shape",
                value: params.shape,
                reason: "must be a finite number greater than zero",
            });
        }
        if !params.location.is_finite() {
            return Err(ReliabilityError::InvalidParameter {
                name: "location",
                value: params.location,
                reason: "must be finite",
            });
        }
        Ok(Self { kind, params })
    }

    /// Probability density at `time`
    pub fn pdf(&self, time: f64) -> f64 {
        let DistributionParams {
            shape,
            location,
            scale,
        } = self.params;
        let z = (time - location) / scale;
        match self.kind {
            DistributionType::Exponential => {
                if z < 0.0 {
                    0.0
                } else {
                    (-z).exp() / scale
                }
            }
            DistributionType::Lognormal => {
                if z <= 0.0 {
                    0.0
                } else {
                    let ln_z = z.ln();
                    (-(ln_z * ln_z) / (2.0 * shape * shape)).exp()
                        / (shape * z * (2.0 * PI).sqrt())
                        / scale
                }
            }
            DistributionType::Normal => (-0.5 * z * z).exp() / ((2.0 * PI).sqrt() * scale),
            DistributionType::Weibull => {
                if z < 0.0 || (z == 0.0 && shape < 1.0) {
                    0.0
                } else {
                    (shape / scale) * z.powf(shape - 1.0) * (-z.powf(shape)).exp()
                }
            }
        }
    }

    /// Probability of surviving past `time`
    pub fn survival(&self, time: f64) -> f64 {
        let DistributionParams {
            shape,
            location,
            scale,
        } = self.params;
        let z = (time - location) / scale;
        match self.kind {
            DistributionType::Exponential => {
                if z <= 0.0 {
                    1.0
                } else {
                    (-z).exp()
                }
            }
            DistributionType::Lognormal => {
                if z <= 0.0 {
                    1.0
                } else {
                    0.5 * erfc(z.ln() / (shape * SQRT_2))
                }
            }
            DistributionType::Normal => 0.5 * erfc(z / SQRT_2),
            DistributionType::Weibull => {
                if z <= 0.0 {
                    1.0
                } else {
                    (-z.powf(shape)).exp()
                }
            }
        }
    }

    /// Instantaneous hazard rate; zero for non-positive times
    pub fn hazard_rate(&self, time: f64) -> f64 {
        if time <= 0.0 {
            return 0.0;
        }
        let DistributionParams {
            shape,
            location,
            scale,
        } = self.params;
        let z = (time - location) / scale;
        match self.kind {
            // Closed forms avoid 0/0 far in the tail
            DistributionType::Exponential => {
                if z < 0.0 {
                    0.0
                } else {
                    1.0 / scale
                }
            }
            DistributionType::Weibull => {
                if z < 0.0 || (z == 0.0 && shape < 1.0) {
                    0.0
                } else {
                    (shape / scale) * z.powf(shape - 1.0)
                }
            }
            DistributionType::Lognormal | DistributionType::Normal => {
                let sf = self.survival(time);
                let pdf = self.pdf(time);
                if sf > f64::MIN_POSITIVE && pdf > 0.0 {
                    return pdf / sf;
                }
                // Far tail: pdf or sf has underflowed, use the Mills ratio instead
                match self.kind {
                    DistributionType::Normal => tail_hazard(z) / scale,
                    _ if z <= 0.0 => 0.0,
                    _ => tail_hazard(z.ln() / shape) / (shape * z * scale),
                }
            }
        }
    }

    /// Mean time between failures (the distribution mean)
    pub fn mtbf(&self) -> f64 {
        let DistributionParams {
            shape,
            location,
            scale,
        } = self.params;
        match self.kind {
            DistributionType::Exponential => location + scale,
            DistributionType::Lognormal => location + scale * (shape * shape / 2.0).exp(),
            DistributionType::Normal => location,
            DistributionType::Weibull => location + scale * gamma(1.0 + 1.0 / shape),
        }
    }
}

/// Standard normal hazard `φ(w) / Q(w)` for large `w`, from the asymptotic
/// Mills ratio `Q(w) / φ(w) ≈ (1 - 1/w² + 3/w⁴ - 15/w⁶) / w`
fn tail_hazard(w: f64) -> f64 {
    if w <= 0.0 {
        return 0.0;
    }
    let w2 = w * w;
    w / (1.0 - 1.0 / w2 + 3.0 / (w2 * w2) - 15.0 / (w2 * w2 * w2))
}

fn distribution(dist_type: &str, params: &DistributionParams) -> Result<Distribution> {
    Distribution::new(dist_type.parse()?, *params)
}

/// Hazard rate of `dist_type` at `time`
pub fn calculate_hazard_rate(dist_type: &str, params: &DistributionParams, time: f64) -> Result<f64> {
    Ok(distribution(dist_type, params)?.hazard_rate(time))
}

/// MTBF of `dist_type`
pub fn calculate_mtbf(dist_type: &str, params: &DistributionParams) -> Result<f64> {
    Ok(distribution(dist_type, params)?.mtbf())
}

/// Survival probability of `dist_type` at `time`
pub fn calculate_survival(dist_type: &str, params: &DistributionParams, time: f64) -> Result<f64> {
    Ok(distribution(dist_type, params)?.survival(time))
}

/// Complementary error function (Numerical Recipes `erfcc`)
///
/// Fractional error below 1.2e-7 everywhere.
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.26551223
        + t * (1.00002368
            + t * (0.37409196
                + t * (0.09678418
                    + t * (-0.18628806
                        + t * (0.27886807
                            + t * (-1.13520398
                                + t * (1.48851587 + t * (-0.82215223 + t * 0.17087277))))))));
    let r = t * poly.exp();
    if x >= 0.0 {
        r
    } else {
        2.0 - r
    }
}

/// Gamma function via the Lanczos approximation (g = 7, n = 9)
fn gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_59,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_571_6e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection formula
        PI / ((PI * x).sin() * gamma(1.0 - x))
    } else {
        let x = x - 1.0;
        let mut a = COEFFS[0];
        let t = x + G + 0.5;
        for (i, c) in COEFFS.iter().enumerate().skip(1) {
            a += c / (x + i as f64);
        }
        (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * a
    }
}

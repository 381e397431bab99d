//! Derating stress limit tables
//!
//! Limits are a read-only tree loaded once per analysis run. Leaves are
//! per-severity-tier lists; every path from a category down to a stress kind
//! ends in one of those lists.

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::error::{ReliabilityError, Result};
use crate::core::lookup::{get_by_id, LookupContext};

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedLimits;

const DEFAULT_LIMITS_FILE: &str = "stress_limits.yaml";

/// One level of the limit tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LimitNode {
    /// Limit per severity tier
    Tiers(Vec<f64>),
    /// Named children (family, power class or stress kind)
    Group(BTreeMap<String, LimitNode>),
}

/// Category-keyed stress limit table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StressLimits(BTreeMap<String, LimitNode>);

impl StressLimits {
    /// The table compiled into the binary
    pub fn builtin() -> Result<Self> {
        let file = EmbeddedLimits::get(DEFAULT_LIMITS_FILE).ok_or_else(|| {
            ReliabilityError::MissingLimit {
                path: DEFAULT_LIMITS_FILE.to_string(),
            }
        })?;
        Self::from_yaml_str(&String::from_utf8_lossy(&file.data))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yml::from_str(yaml)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let limits = Self::from_yaml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded stress limits");
        Ok(limits)
    }

    /// Load from `path` when given, otherwise fall back to the built-in table
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::builtin(),
        }
    }

    /// Walk the tree along `path`
    pub fn node(&self, path: &[&str]) -> Option<&LimitNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.0.get(*first)?;
        for key in rest {
            node = match node {
                LimitNode::Group(children) => children.get(*key)?,
                LimitNode::Tiers(_) => return None,
            };
        }
        Some(node)
    }

    /// True when `path` names a group containing `key`
    pub fn has_child(&self, path: &[&str], key: &str) -> bool {
        matches!(self.node(path), Some(LimitNode::Group(children)) if children.contains_key(key))
    }

    /// Per-tier limits at `path`
    pub fn tiers(&self, path: &[&str]) -> Result<&[f64]> {
        match self.node(path) {
            Some(LimitNode::Tiers(tiers)) => Ok(tiers),
            _ => Err(ReliabilityError::MissingLimit {
                path: path.join("."),
            }),
        }
    }

    /// Limit at `path` for a 1-based severity tier
    pub fn limit(&self, path: &[&str], environment_id: u32, ctx: LookupContext) -> Result<f64> {
        get_by_id(self.tiers(path)?, environment_id, ctx)
    }

    /// Every leaf as a dotted path and its tier values, in sorted order
    pub fn entries(&self) -> Vec<(String, Vec<f64>)> {
        let mut out = Vec::new();
        for (name, node) in &self.0 {
            collect(name.clone(), node, &mut out);
        }
        out
    }
}

fn collect(prefix: String, node: &LimitNode, out: &mut Vec<(String, Vec<f64>)>) {
    match node {
        LimitNode::Tiers(tiers) => out.push((prefix, tiers.clone())),
        LimitNode::Group(children) => {
            for (name, child) in children {
                collect(format!("{}.{}", prefix, name), child, out);
            }
        }
    }
}

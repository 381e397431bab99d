//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;
use crate::core::{Attributes, Config, StressLimits};

/// Read a component's attributes from a YAML or JSON file
///
/// `.json` files are parsed as JSON, everything else as YAML.
pub fn read_attributes(path: &Path) -> Result<Attributes> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("cannot read '{}': {}", path.display(), e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let attributes = if is_json {
        serde_json::from_str(&contents).into_diagnostic()?
    } else {
        serde_yml::from_str(&contents).into_diagnostic()?
    };
    tracing::debug!(path = %path.display(), "loaded attributes");
    Ok(attributes)
}

/// Stress limits from `--limits`, else the configured table, else the built-in one
pub fn load_limits(explicit: Option<&Path>, config: &Config) -> Result<StressLimits> {
    let path = explicit.or(config.stress_limits.as_deref());
    Ok(StressLimits::load(path)?)
}

/// Two-column key/value table
pub fn attributes_table(attributes: &Attributes) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Attribute", "Value"]);
    for (key, value) in attributes.iter() {
        builder.push_record([key.clone(), value.to_string()]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Print `value` as YAML or JSON
///
/// Table output is command specific, so callers handle it before this.
pub fn print_serialized<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_attributes_yaml_and_json() {
        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(yaml, "category_id: 10\nsubcategory_id: 4\ncurrent_ratio: 0.05").unwrap();
        let attrs = read_attributes(yaml.path()).unwrap();
        assert_eq!(attrs.get_id("category_id").unwrap(), 10);

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"category_id": 6, "type_id": 2, "current_ratio": 0.4}}"#).unwrap();
        let attrs = read_attributes(json.path()).unwrap();
        assert_eq!(attrs.get_f64("current_ratio").unwrap(), 0.4);
    }

    #[test]
    fn test_read_attributes_missing_file() {
        let err = read_attributes(Path::new("/nonexistent/part.yaml")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_load_limits_prefers_explicit_path() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "miscellaneous:\n  lamp:\n    current: [0.5, 0.5, 0.5]\n").unwrap();
        let config = Config::default();
        let limits = load_limits(Some(tmp.path()), &config).unwrap();
        assert_eq!(limits.tiers(&["miscellaneous", "lamp", "current"]).unwrap(), &[0.5, 0.5, 0.5]);

        let builtin = load_limits(None, &config).unwrap();
        assert_eq!(builtin.tiers(&["miscellaneous", "lamp", "current"]).unwrap(), &[0.2, 0.1, 0.1]);
    }

    #[test]
    fn test_attributes_table_lists_every_key() {
        let attrs = Attributes::new().with("lambda_b", 0.01).with("quality_id", 1_i64);
        let table = attributes_table(&attrs);
        assert!(table.contains("lambda_b"));
        assert!(table.contains("0.01"));
        assert!(table.contains("quality_id"));
    }
}

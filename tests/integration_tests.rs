//! Integration tests for the relk CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a relk command isolated from the caller's configuration
fn relk(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("relk").unwrap();
    cmd.current_dir(tmp.path())
        .env_remove("RELK_STRESS_LIMITS")
        .env_remove("RELK_HR_MULTIPLIER")
        .env_remove("RELK_FORMAT")
        .env_remove("RELK_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"));
    cmd
}

/// Helper to write a file into the temp directory
fn write_file(tmp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const STRICT_LAMP_LIMITS: &str = "miscellaneous:\n  lamp:\n    current: [0.1, 0.1, 0.1]\n";

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    relk(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("predict"))
        .stdout(predicate::str::contains("derate"))
        .stdout(predicate::str::contains("dist"))
        .stdout(predicate::str::contains("limits"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    relk(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("relk"));
}

// ============================================================================
// Prediction Tests
// ============================================================================

#[test]
fn test_fuse_part_stress_hazard_rate() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(
        &tmp,
        "fuse.yaml",
        "category_id: 10\nsubcategory_id: 3\nenvironment_active_id: 1\nquality_id: 1\npiE: 1.0\n",
    );
    relk(&tmp)
        .args(["--format", "json", "predict", "stress"])
        .arg(&part)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hazard_rate_active\": 0.01"))
        .stdout(predicate::str::contains("\"lambda_b\": 0.01"));
}

#[test]
fn test_part_count_quiet_prints_hazard_rate() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(
        &tmp,
        "resistor.yaml",
        "category_id: 3\nsubcategory_id: 1\nenvironment_active_id: 1\nquality_id: 4\n",
    );
    relk(&tmp)
        .args(["--quiet", "predict", "count"])
        .arg(&part)
        .assert()
        .success()
        .stdout("0.0005\n");
}

#[test]
fn test_part_count_table_output() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(
        &tmp,
        "switch.json",
        r#"{"category_id": 7, "subcategory_id": 1, "environment_active_id": 1, "quality_id": 2}"#,
    );
    relk(&tmp)
        .args(["predict", "count"])
        .arg(&part)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parts count prediction"))
        .stdout(predicate::str::contains("piQ"));
}

#[test]
fn test_part_stress_from_operating_values() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(
        &tmp,
        "resistor.yaml",
        "category_id: 3\nsubcategory_id: 4\nenvironment_active_id: 1\nquality_id: 1\n\
         temperature_active: 40.0\npower_operating: 0.05\npower_rated: 0.1\nn_elements: 10\n",
    );
    relk(&tmp)
        .args(["--format", "yaml", "predict", "stress"])
        .arg(&part)
        .assert()
        .success()
        .stdout(predicate::str::contains("power_ratio: 0.5"))
        .stdout(predicate::str::contains("temperature_case: 67.5"))
        .stdout(predicate::str::contains("piT:"));
}

#[test]
fn test_predict_with_metrics() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(
        &tmp,
        "fuse.yaml",
        "category_id: 10\nsubcategory_id: 3\nenvironment_active_id: 1\nquality_id: 1\n",
    );
    relk(&tmp)
        .args(["--format", "json", "predict", "stress", "--metrics", "--mission-time", "1000"])
        .arg(&part)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mtbf_logistics\": 100000000.0"))
        .stdout(predicate::str::contains("reliability_mission"));
}

#[test]
fn test_predict_missing_attribute_fails() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(&tmp, "lamp.yaml", "category_id: 10\nsubcategory_id: 4\npiE: 1.0\n");
    relk(&tmp)
        .args(["predict", "stress"])
        .arg(&part)
        .assert()
        .failure()
        .stderr(predicate::str::contains("quality_id").or(predicate::str::contains("voltage_rated")));
}

#[test]
fn test_predict_unknown_category_fails() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(&tmp, "part.yaml", "category_id: 4\nsubcategory_id: 1\n");
    relk(&tmp)
        .args(["predict", "count"])
        .arg(&part)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown part category ID 4"));
}

#[test]
fn test_predict_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    relk(&tmp)
        .args(["predict", "count", "does-not-exist.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ============================================================================
// Derating Tests
// ============================================================================

#[test]
fn test_lamp_within_limit() {
    let tmp = TempDir::new().unwrap();
    let limits = write_file(&tmp, "limits.yaml", STRICT_LAMP_LIMITS);
    let part = write_file(
        &tmp,
        "lamp.yaml",
        "category_id: 10\nsubcategory_id: 4\nenvironment_active_id: 1\ncurrent_ratio: 0.05\n",
    );
    relk(&tmp)
        .args(["derate", "--limits"])
        .arg(&limits)
        .arg(&part)
        .assert()
        .success()
        .stdout(predicate::str::contains("Within derating limits"));
}

#[test]
fn test_lamp_overstress_reason() {
    let tmp = TempDir::new().unwrap();
    let limits = write_file(&tmp, "limits.yaml", STRICT_LAMP_LIMITS);
    let part = write_file(
        &tmp,
        "lamp.yaml",
        "category_id: 10\nsubcategory_id: 4\nenvironment_active_id: 1\ncurrent_ratio: 0.95\n",
    );
    relk(&tmp)
        .args(["--format", "json", "derate", "--limits"])
        .arg(&limits)
        .arg(&part)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"overstress\": true"))
        .stdout(predicate::str::contains(
            "Current ratio of 0.95 exceeds the allowable limit of 0.1.\\n",
        ));
}

#[test]
fn test_derate_quiet_prints_flag() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(
        &tmp,
        "lamp.yaml",
        "category_id: 10\nsubcategory_id: 4\nenvironment_active_id: 2\ncurrent_ratio: 0.15\n",
    );
    relk(&tmp)
        .args(["--quiet", "derate"])
        .arg(&part)
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_derate_invalid_environment_names_family() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(
        &tmp,
        "lamp.yaml",
        "category_id: 10\nsubcategory_id: 4\nenvironment_active_id: 15\ncurrent_ratio: 0.05\n",
    );
    relk(&tmp)
        .arg("derate")
        .arg(&part)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid miscellaneous environment ID 15"));
}

#[test]
fn test_derate_computes_ratios_from_operating_values() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(
        &tmp,
        "switch.yaml",
        "category_id: 7\nsubcategory_id: 1\ntype_id: 1\nenvironment_active_id: 1\n\
         current_operating: 9.0\ncurrent_rated: 10.0\npower_operating: 1.0\npower_rated: 10.0\n",
    );
    relk(&tmp)
        .args(["derate"])
        .arg(&part)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overstressed"))
        .stdout(predicate::str::contains("Current ratio of 0.9 exceeds the allowable limit of 0.7."));
}

#[test]
fn test_relay_unknown_type_fails() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(
        &tmp,
        "relay.yaml",
        "category_id: 6\nsubcategory_id: 1\ntype_id: 99\nenvironment_active_id: 1\n\
         current_ratio: 0.2\ntemperature_active: 30\ntemperature_rated_max: 85\n",
    );
    relk(&tmp)
        .arg("derate")
        .arg(&part)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown relay type ID 99"));
}

#[test]
fn test_derate_bad_ratio_fails() {
    let tmp = TempDir::new().unwrap();
    let part = write_file(
        &tmp,
        "lamp.yaml",
        "category_id: 10\nsubcategory_id: 4\nenvironment_active_id: 1\ncurrent_ratio: high\n",
    );
    relk(&tmp)
        .arg("derate")
        .arg(&part)
        .assert()
        .failure()
        .stderr(predicate::str::contains("current_ratio"));
}

#[test]
fn test_derate_limits_from_environment_variable() {
    let tmp = TempDir::new().unwrap();
    let limits = write_file(&tmp, "limits.yaml", STRICT_LAMP_LIMITS);
    let part = write_file(
        &tmp,
        "lamp.yaml",
        "category_id: 10\nsubcategory_id: 4\nenvironment_active_id: 1\ncurrent_ratio: 0.15\n",
    );
    relk(&tmp)
        .env("RELK_STRESS_LIMITS", &limits)
        .args(["--quiet", "derate"])
        .arg(&part)
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_derate_missing_limit_fails() {
    let tmp = TempDir::new().unwrap();
    let limits = write_file(&tmp, "limits.yaml", STRICT_LAMP_LIMITS);
    let part = write_file(
        &tmp,
        "relay.yaml",
        "category_id: 6\ntype_id: 1\nenvironment_active_id: 1\ncurrent_ratio: 0.2\n",
    );
    relk(&tmp)
        .args(["derate", "--limits"])
        .arg(&limits)
        .arg(&part)
        .assert()
        .failure()
        .stderr(predicate::str::contains("relay.resistive_load.current"));
}

// ============================================================================
// Distribution Tests
// ============================================================================

#[test]
fn test_dist_exponential_mtbf() {
    let tmp = TempDir::new().unwrap();
    relk(&tmp)
        .args(["--quiet", "dist", "mtbf", "--type", "exponential", "--scale", "1000"])
        .assert()
        .success()
        .stdout("1000.0\n");
}

#[test]
fn test_dist_weibull_hazard_json() {
    let tmp = TempDir::new().unwrap();
    relk(&tmp)
        .args([
            "--format", "json", "dist", "hazard", "--type", "weibull", "--shape", "2", "--scale", "100",
            "--time", "50",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"quantity\": \"hazard_rate\""))
        .stdout(predicate::str::contains("\"value\": 0.01"));
}

#[test]
fn test_dist_hazard_at_time_zero() {
    let tmp = TempDir::new().unwrap();
    relk(&tmp)
        .args(["--quiet", "dist", "hazard", "--type", "normal", "--location", "100", "--scale", "10"])
        .assert()
        .success()
        .stdout("0.0\n");
}

#[test]
fn test_dist_unsupported_type_fails() {
    let tmp = TempDir::new().unwrap();
    relk(&tmp)
        .args(["dist", "mtbf", "--type", "gamma"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported distribution type 'gamma'"));
}

#[test]
fn test_dist_invalid_scale_fails() {
    let tmp = TempDir::new().unwrap();
    relk(&tmp)
        .args(["dist", "survival", "--type", "weibull", "--scale", "0", "--time", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scale"));
}

// ============================================================================
// Limits Tests
// ============================================================================

#[test]
fn test_limits_show_builtin() {
    let tmp = TempDir::new().unwrap();
    relk(&tmp)
        .args(["limits", "show", "--prefix", "resistor.fixed_film.low_power"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resistor.fixed_film.low_power.power"))
        .stdout(predicate::str::contains("0.65"))
        .stdout(predicate::str::contains("relay").not());
}

#[test]
fn test_limits_show_custom_yaml() {
    let tmp = TempDir::new().unwrap();
    let limits = write_file(&tmp, "limits.yaml", STRICT_LAMP_LIMITS);
    relk(&tmp)
        .args(["--format", "yaml", "limits", "show", "--limits"])
        .arg(&limits)
        .assert()
        .success()
        .stdout(predicate::str::contains("miscellaneous:"))
        .stdout(predicate::str::contains("resistor").not());
}

#[test]
fn test_project_config_sets_default_format() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".relk")).unwrap();
    write_file(&tmp, ".relk/config.yaml", "default_format: json\n");
    relk(&tmp)
        .args(["dist", "mtbf", "--type", "exponential", "--scale", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": 10.0"));
}

//! Tests for the prom-rule-ci argument handling

use clap::Parser;
use cnao_prom_rule_ci::{Cli, VerifierConfig, DEFAULT_PROMETHEUS_IMAGE};
use std::path::PathBuf;

#[test]
fn test_cli_parsing_three_arguments() {
    let args = vec!["prom-rule-ci", "podman", "_out/rules.json", "hack/prom-rule-ci/prom-rules-tests.yaml"];
    let cli = Cli::try_parse_from(args).unwrap();

    assert_eq!(cli.oci_bin, PathBuf::from("podman"));
    assert_eq!(cli.target_file, PathBuf::from("_out/rules.json"));
    assert_eq!(cli.tests_file, PathBuf::from("hack/prom-rule-ci/prom-rules-tests.yaml"));
}

#[test]
fn test_cli_rejects_missing_arguments() {
    assert!(Cli::try_parse_from(vec!["prom-rule-ci"]).is_err());
    assert!(Cli::try_parse_from(vec!["prom-rule-ci", "docker"]).is_err());
    assert!(Cli::try_parse_from(vec!["prom-rule-ci", "docker", "rules.json"]).is_err());
}

#[test]
fn test_cli_rejects_extra_arguments() {
    let args = vec!["prom-rule-ci", "docker", "rules.json", "tests.yaml", "extra"];
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn test_cli_into_config() {
    let cli = Cli::try_parse_from(vec!["prom-rule-ci", "docker", "rules.json", "tests.yaml"]).unwrap();
    let config = VerifierConfig::from(cli);

    assert_eq!(config.oci_bin, PathBuf::from("docker"));
    assert_eq!(config.namespace, "ci");
    assert_eq!(config.image, DEFAULT_PROMETHEUS_IMAGE);
}

// Integration tests for the operator monitoring crates
// These tests exercise the registry, the manifest builder and the CI verifier together
#![cfg(test)]

use async_trait::async_trait;
use cnao_monitoring::alerts::{self, COMPONENT_LABEL_VALUE, PART_OF_LABEL_VALUE};
use cnao_monitoring::linter::{lint_alerts, lint_recording_rules};
use cnao_monitoring::{
    build_prometheus_rule, render_yaml, setup_rules_with_template, AlertRule, OperatorRegisterer,
    PrometheusRule, PrometheusRuleSpec, RunbookTemplate,
};
use cnao_prom_rule_ci::{RuleEngine, Stage, Verifier, VerifierConfig, VerifyError};
use std::path::Path;

/// Engine that reads the rule file back and requires every alert to carry a runbook
struct StructuralEngine;

#[async_trait]
impl RuleEngine for StructuralEngine {
    async fn check_rules(&self, rules: &Path) -> Result<(), VerifyError> {
        let raw = std::fs::read(rules).map_err(|source| VerifyError::Io {
            path: rules.to_path_buf(),
            source,
        })?;
        let spec: PrometheusRuleSpec =
            serde_json::from_slice(&raw).map_err(|_| VerifyError::CommandFailed { stage: Stage::Lint, code: Some(1) })?;

        let missing_runbook = spec
            .groups
            .iter()
            .flat_map(|g| g.rules.iter())
            .any(|r| r.alert.is_some() && !r.annotations.contains_key("runbook_url"));
        if missing_runbook {
            return Err(VerifyError::CommandFailed { stage: Stage::Lint, code: Some(1) });
        }
        Ok(())
    }

    async fn test_rules(&self, rules: &Path, tests: &Path) -> Result<(), VerifyError> {
        if rules.exists() && tests.exists() {
            Ok(())
        } else {
            Err(VerifyError::CommandFailed { stage: Stage::UnitTest, code: Some(1) })
        }
    }
}

#[test]
fn test_two_alert_groups_end_to_end() {
    let mut registry = OperatorRegisterer::new();
    let runbook = RunbookTemplate::default();

    let group_a = vec![AlertRule::new("X", "up == 0").severity("warning").summary("s")];
    let group_b = vec![AlertRule::new("A", "up == 1").severity("critical").summary("t")];
    alerts::register_groups(&mut registry, &runbook, [group_a, group_b]);

    let listed = registry.list_alerts();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].alert, "A");
    assert_eq!(listed[1].alert, "X");
    for alert in &listed {
        assert_eq!(alert.annotations["runbook_url"], runbook.url_for(&alert.alert));
        assert_eq!(alert.labels["kubernetes_operator_part_of"], PART_OF_LABEL_VALUE);
        assert_eq!(alert.labels["kubernetes_operator_component"], COMPONENT_LABEL_VALUE);
    }
}

#[test]
fn test_manifest_round_trip() {
    let mut registry = OperatorRegisterer::new();
    setup_rules_with_template(&mut registry, "cluster-network-addons", &RunbookTemplate::default());

    assert!(lint_alerts(&registry.list_alerts()).is_empty());
    assert!(lint_recording_rules(&registry.list_recording_rules()).is_empty());

    let rule = build_prometheus_rule(&registry, "cluster-network-addons");
    let yaml = render_yaml(&rule).unwrap();
    let parsed: PrometheusRule = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(parsed.metadata.namespace.as_deref(), Some("cluster-network-addons"));
    assert_eq!(parsed.spec, PrometheusRuleSpec::from_registry(&registry));
}

#[tokio::test]
async fn test_verifier_with_structural_engine() {
    let dir = tempfile::tempdir().unwrap();
    let tests = dir.path().join("prom-rules-tests.yaml");
    std::fs::write(&tests, "tests: []\n").unwrap();
    let target = dir.path().join("rules.json");

    let config = VerifierConfig::new("podman", &target, &tests);
    let verifier = Verifier::new(config, Box::new(StructuralEngine)).with_runbook_template(RunbookTemplate::default());

    verifier.verify().await.unwrap();
    assert!(!target.exists());
}

#[tokio::test]
async fn test_verifier_missing_fixture_fails_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("rules.json");

    let config = VerifierConfig::new("podman", &target, dir.path().join("missing.yaml"));
    let verifier = Verifier::new(config, Box::new(StructuralEngine)).with_runbook_template(RunbookTemplate::default());

    let err = verifier.verify().await.unwrap_err();
    assert!(matches!(err, VerifyError::CommandFailed { stage: Stage::UnitTest, .. }));
    assert!(!target.exists());
}

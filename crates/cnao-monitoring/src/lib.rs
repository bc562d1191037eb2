//! # CNAO Monitoring
//!
//! Prometheus alerting and recording rules for the cluster network addons operator.
//!
//! Rules are registered into an [`OperatorRegisterer`] at startup. Alerts pass
//! through label and runbook enrichment on the way in, and the registry can then
//! be listed, linted, documented or turned into a deployable [`PrometheusRule`].

pub mod alerts;
pub mod docs;
pub mod error;
pub mod linter;
pub mod prometheus_rule;
pub mod recording_rules;
pub mod registry;
pub mod runbook;
pub mod types;

pub use error::*;
pub use prometheus_rule::*;
pub use registry::*;
pub use runbook::*;
pub use types::*;

use tracing::info;

/// Register every operator recording rule and alert for `namespace`.
///
/// The runbook URL template is resolved from the environment before anything
/// is registered, so a bad template leaves the registry untouched.
pub fn setup_rules(registry: &mut OperatorRegisterer, namespace: &str) -> Result<(), MonitoringError> {
    let runbook = RunbookTemplate::from_env()?;
    setup_rules_with_template(registry, namespace, &runbook);
    Ok(())
}

/// Same as [`setup_rules`] with an already resolved runbook template.
pub fn setup_rules_with_template(
    registry: &mut OperatorRegisterer,
    namespace: &str,
    runbook: &RunbookTemplate,
) {
    recording_rules::register(registry, namespace);
    alerts::register(registry, runbook);

    info!(
        namespace,
        alerts = registry.alert_count(),
        recording_rules = registry.recording_rule_count(),
        "operator monitoring rules registered"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_rules_registers_everything() {
        let mut registry = OperatorRegisterer::new();
        setup_rules_with_template(&mut registry, "ci", &RunbookTemplate::default());

        assert_eq!(registry.alert_count(), alerts::operator_alerts().len());
        assert_eq!(
            registry.recording_rule_count(),
            recording_rules::operator_recording_rules("ci").len()
                + recording_rules::kubemacpool_recording_rules("ci").len()
        );
    }

    #[test]
    fn test_setup_rules_is_idempotent() {
        let mut registry = OperatorRegisterer::new();
        let runbook = RunbookTemplate::default();
        setup_rules_with_template(&mut registry, "ci", &runbook);
        let first = registry.list_alerts();

        setup_rules_with_template(&mut registry, "ci", &runbook);
        assert_eq!(registry.list_alerts(), first);
    }

    #[test]
    fn test_recording_rules_follow_namespace() {
        let mut registry = OperatorRegisterer::new();
        setup_rules_with_template(&mut registry, "cluster-network-addons", &RunbookTemplate::default());

        for rule in registry.list_recording_rules() {
            assert!(
                rule.expr.contains("namespace='cluster-network-addons'"),
                "{} does not scope to the namespace: {}",
                rule.name,
                rule.expr
            );
        }
    }
}

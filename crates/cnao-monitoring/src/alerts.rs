//! Operator alerts and the enrichment applied when they are registered

use crate::registry::OperatorRegisterer;
use crate::runbook::RunbookTemplate;
use crate::types::{AlertRule, RUNBOOK_ANNOTATION_KEY};

pub const PART_OF_LABEL_KEY: &str = "kubernetes_operator_part_of";
pub const PART_OF_LABEL_VALUE: &str = "kubevirt";
pub const COMPONENT_LABEL_KEY: &str = "kubernetes_operator_component";
pub const COMPONENT_LABEL_VALUE: &str = "cluster-network-addons-operator";

const DEFAULT_FOR: &str = "5m";

/// Alerts on the operator itself and on the add-ons it deploys
pub fn operator_alerts() -> Vec<AlertRule> {
    vec![
        AlertRule::new("CnaoDown", "kubevirt_cnao_operator_up == 0")
            .for_duration(DEFAULT_FOR)
            .summary("CNAO pod is down.")
            .severity("warning")
            .health_impact("warning"),
        AlertRule::new(
            "KubeMacPoolDuplicateMacsFound",
            "kubevirt_cnao_kubemacpool_duplicate_macs != 0",
        )
        .for_duration(DEFAULT_FOR)
        .summary("Duplicate macs found.")
        .severity("warning")
        .health_impact("warning"),
        AlertRule::new(
            "KubemacpoolDown",
            "kubevirt_cnao_cr_kubemacpool_deployed == 1 and kubevirt_cnao_kubemacpool_manager_up == 0",
        )
        .for_duration(DEFAULT_FOR)
        .summary("KubeMacpool is deployed by CNAO CR but KubeMacpool pod is down.")
        .severity("critical")
        .health_impact("critical"),
        AlertRule::new("NetworkAddonsConfigNotReady", "kubevirt_cnao_cr_ready == 0")
            .for_duration(DEFAULT_FOR)
            .summary("CNAO CR NetworkAddonsConfig is not ready.")
            .severity("warning")
            .health_impact("warning"),
    ]
}

/// Register the operator alerts
pub fn register(registry: &mut OperatorRegisterer, runbook: &RunbookTemplate) {
    register_groups(registry, runbook, [operator_alerts()]);
}

/// Enrich and register alert groups.
///
/// Every alert gets the part-of and component labels plus a `runbook_url`
/// annotation built from its own name before it reaches the registry.
pub fn register_groups<I, G>(registry: &mut OperatorRegisterer, runbook: &RunbookTemplate, groups: I)
where
    I: IntoIterator<Item = G>,
    G: IntoIterator<Item = AlertRule>,
{
    let enriched = groups
        .into_iter()
        .map(|group| group.into_iter().map(|alert| enrich(alert, runbook)).collect::<Vec<_>>());
    registry.register_alerts(enriched);
}

fn enrich(mut alert: AlertRule, runbook: &RunbookTemplate) -> AlertRule {
    alert
        .labels
        .insert(PART_OF_LABEL_KEY.to_string(), PART_OF_LABEL_VALUE.to_string());
    alert
        .labels
        .insert(COMPONENT_LABEL_KEY.to_string(), COMPONENT_LABEL_VALUE.to_string());
    let url = runbook.url_for(&alert.alert);
    alert.annotations.insert(RUNBOOK_ANNOTATION_KEY.to_string(), url);
    alert
}

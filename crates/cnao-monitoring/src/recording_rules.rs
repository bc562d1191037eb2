//! Recording rules scoped to the operator namespace

use crate::registry::OperatorRegisterer;
use crate::types::RecordingRule;

pub fn operator_recording_rules(namespace: &str) -> Vec<RecordingRule> {
    vec![RecordingRule::gauge(
        "kubevirt_cnao_operator_up",
        "Total count of running CNAO operators",
        format!("sum(up{{namespace='{namespace}', pod=~'cluster-network-addons-operator-.*'}} or vector(0))"),
    )]
}

pub fn kubemacpool_recording_rules(namespace: &str) -> Vec<RecordingRule> {
    vec![
        RecordingRule::gauge(
            "kubevirt_cnao_cr_kubemacpool_deployed",
            "KubeMacpool is deployed by CNAO CR",
            format!("sum(kubevirt_cnao_cr_kubemacpool_aggregated{{namespace='{namespace}'}} or vector(0))"),
        ),
        RecordingRule::gauge(
            "kubevirt_cnao_kubemacpool_manager_up",
            "Total count of running KubeMacPool manager pods",
            format!("sum(up{{namespace='{namespace}', pod=~'kubemacpool-mac-controller-manager-.*'}} or vector(0))"),
        ),
        RecordingRule::gauge(
            "kubevirt_cnao_kubemacpool_duplicate_macs",
            "Total count of duplicate KubeMacPool MAC addresses",
            format!("sum(kubevirt_kmp_duplicate_macs{{namespace='{namespace}'}} or vector(0))"),
        ),
    ]
}

/// Register all recording rules for `namespace`
pub fn register(registry: &mut OperatorRegisterer, namespace: &str) {
    registry.register_recording_rules([
        operator_recording_rules(namespace),
        kubemacpool_recording_rules(namespace),
    ]);
}

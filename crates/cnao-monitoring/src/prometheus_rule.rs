//! # PrometheusRule
//!
//! `monitoring.coreos.com/v1` PrometheusRule resource and the builder that
//! turns a registry into one.

use crate::error::MonitoringError;
use crate::registry::OperatorRegisterer;
use crate::types::{AlertRule, RecordingRule};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PROMETHEUS_RULE_NAME: &str = "prometheus-rules-cluster-network-addons-operator";
pub const PROMETHEUS_RULE_LABEL_KEY: &str = "prometheus.cnao.io";
pub const PROMETHEUS_RULE_LABEL_VALUE: &str = "true";
pub const ALERTS_GROUP_NAME: &str = "alerts.rules";
pub const RECORDING_RULES_GROUP_NAME: &str = "recordingRules.rules";

/// PrometheusRule CRD, as consumed by the Prometheus operator
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[kube(
    group = "monitoring.coreos.com",
    version = "v1",
    kind = "PrometheusRule",
    plural = "prometheusrules",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusRuleSpec {
    /// Rule groups
    #[serde(default)]
    pub groups: Vec<RuleGroup>,
}

/// Named group of rules evaluated together
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RuleGroup {
    pub name: String,
    pub rules: Vec<Rule>,
}

/// Single alerting or recording rule in a group
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,

    pub expr: String,

    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_duration: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl From<&AlertRule> for Rule {
    fn from(alert: &AlertRule) -> Self {
        Self {
            alert: Some(alert.alert.clone()),
            record: None,
            expr: alert.expr.clone(),
            for_duration: alert.for_duration.clone(),
            labels: alert.labels.clone(),
            annotations: alert.annotations.clone(),
        }
    }
}

impl From<&RecordingRule> for Rule {
    fn from(rule: &RecordingRule) -> Self {
        Self {
            record: Some(rule.name.clone()),
            expr: rule.expr.clone(),
            ..Self::default()
        }
    }
}

impl PrometheusRuleSpec {
    /// Alerts group followed by the recording rules group; empty groups are left out
    pub fn from_registry(registry: &OperatorRegisterer) -> Self {
        let mut groups = Vec::new();

        let alerts = registry.list_alerts();
        if !alerts.is_empty() {
            groups.push(RuleGroup {
                name: ALERTS_GROUP_NAME.to_string(),
                rules: alerts.iter().map(Rule::from).collect(),
            });
        }

        let recording_rules = registry.list_recording_rules();
        if !recording_rules.is_empty() {
            groups.push(RuleGroup {
                name: RECORDING_RULES_GROUP_NAME.to_string(),
                rules: recording_rules.iter().map(Rule::from).collect(),
            });
        }

        Self { groups }
    }

    /// JSON document handed to promtool
    pub fn to_json(&self) -> Result<Vec<u8>, MonitoringError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

/// Build the operator's PrometheusRule for `namespace`
pub fn build_prometheus_rule(registry: &OperatorRegisterer, namespace: &str) -> PrometheusRule {
    let mut rule = PrometheusRule::new(PROMETHEUS_RULE_NAME, PrometheusRuleSpec::from_registry(registry));
    rule.metadata.namespace = Some(namespace.to_string());
    rule.metadata.labels = Some(BTreeMap::from([(
        PROMETHEUS_RULE_LABEL_KEY.to_string(),
        PROMETHEUS_RULE_LABEL_VALUE.to_string(),
    )]));
    rule
}

/// Render a PrometheusRule as a YAML manifest
pub fn render_yaml(rule: &PrometheusRule) -> Result<String, MonitoringError> {
    Ok(serde_yaml::to_string(rule)?)
}

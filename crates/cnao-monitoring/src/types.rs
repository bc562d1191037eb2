//! Alert and recording rule definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const SUMMARY_ANNOTATION_KEY: &str = "summary";
pub const RUNBOOK_ANNOTATION_KEY: &str = "runbook_url";
pub const SEVERITY_LABEL_KEY: &str = "severity";
pub const HEALTH_IMPACT_LABEL_KEY: &str = "operator_health_impact";

/// A Prometheus alerting rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRule {
    /// Alert name, unique within a registry
    pub alert: String,
    /// PromQL expression
    pub expr: String,
    /// How long the expression must hold before firing
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_duration: Option<String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl AlertRule {
    pub fn new(alert: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            alert: alert.into(),
            expr: expr.into(),
            ..Self::default()
        }
    }

    pub fn for_duration(mut self, duration: impl Into<String>) -> Self {
        self.for_duration = Some(duration.into());
        self
    }

    pub fn annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn summary(self, summary: impl Into<String>) -> Self {
        self.annotation(SUMMARY_ANNOTATION_KEY, summary)
    }

    pub fn severity(self, severity: impl Into<String>) -> Self {
        self.label(SEVERITY_LABEL_KEY, severity)
    }

    pub fn health_impact(self, impact: impl Into<String>) -> Self {
        self.label(HEALTH_IMPACT_LABEL_KEY, impact)
    }
}

/// Type of the series a recording rule produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    #[default]
    Gauge,
    Counter,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricType::Gauge => write!(f, "Gauge"),
            MetricType::Counter => write!(f, "Counter"),
        }
    }
}

/// A Prometheus recording rule together with the metadata used for docs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingRule {
    /// Name of the recorded series, unique within a registry
    pub name: String,
    pub help: String,
    #[serde(rename = "type", default)]
    pub metric_type: MetricType,
    pub expr: String,
}

impl RecordingRule {
    pub fn gauge(name: impl Into<String>, help: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            metric_type: MetricType::Gauge,
            expr: expr.into(),
        }
    }
}

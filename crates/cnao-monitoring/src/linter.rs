//! Static checks for registered rules

use crate::types::{
    AlertRule, RecordingRule, HEALTH_IMPACT_LABEL_KEY, RUNBOOK_ANNOTATION_KEY, SEVERITY_LABEL_KEY,
    SUMMARY_ANNOTATION_KEY,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const SEVERITIES: &[&str] = &["critical", "warning", "info"];
const HEALTH_IMPACTS: &[&str] = &["none", "warning", "critical"];

lazy_static! {
    static ref PASCAL_CASE: Regex = Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap();
    static ref METRIC_NAME: Regex = Regex::new(r"^[a-zA-Z_:][a-zA-Z0-9_:]*$").unwrap();
}

/// A single lint finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Name of the offending rule
    pub rule: String,
    pub message: String,
}

impl Problem {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule, self.message)
    }
}

pub fn lint_alerts(alerts: &[AlertRule]) -> Vec<Problem> {
    alerts.iter().flat_map(lint_alert).collect()
}

pub fn lint_recording_rules(rules: &[RecordingRule]) -> Vec<Problem> {
    rules.iter().flat_map(lint_recording_rule).collect()
}

fn lint_alert(alert: &AlertRule) -> Vec<Problem> {
    let name = alert.alert.as_str();
    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push(Problem::new(name, "alert name is empty"));
    } else if !PASCAL_CASE.is_match(name) {
        problems.push(Problem::new(name, "alert name must be PascalCase"));
    }

    if alert.expr.trim().is_empty() {
        problems.push(Problem::new(name, "expr is empty"));
    }

    match alert.annotations.get(SUMMARY_ANNOTATION_KEY) {
        Some(summary) if !summary.trim().is_empty() => {}
        _ => problems.push(Problem::new(name, "missing summary annotation")),
    }

    if !alert.annotations.contains_key(RUNBOOK_ANNOTATION_KEY) {
        problems.push(Problem::new(name, "missing runbook_url annotation"));
    }

    check_label(&mut problems, alert, SEVERITY_LABEL_KEY, SEVERITIES);
    check_label(&mut problems, alert, HEALTH_IMPACT_LABEL_KEY, HEALTH_IMPACTS);

    problems
}

fn check_label(problems: &mut Vec<Problem>, alert: &AlertRule, key: &str, allowed: &[&str]) {
    match alert.labels.get(key) {
        None => problems.push(Problem::new(&alert.alert, format!("missing {key} label"))),
        Some(value) if !allowed.contains(&value.as_str()) => problems.push(Problem::new(
            &alert.alert,
            format!("{key} label must be one of {}, got {value:?}", allowed.join(", ")),
        )),
        Some(_) => {}
    }
}

fn lint_recording_rule(rule: &RecordingRule) -> Vec<Problem> {
    let name = rule.name.as_str();
    let mut problems = Vec::new();

    if !METRIC_NAME.is_match(name) {
        problems.push(Problem::new(name, "record name is not a valid metric name"));
    }
    if rule.expr.trim().is_empty() {
        problems.push(Problem::new(name, "expr is empty"));
    }
    if rule.help.trim().is_empty() {
        problems.push(Problem::new(name, "help text is empty"));
    }

    problems
}

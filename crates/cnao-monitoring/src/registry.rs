//! Operator rule registry

use crate::types::{AlertRule, RecordingRule};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Registry of alerts and recording rules, de-duplicated by name.
///
/// Registering a rule under a name that is already taken replaces the
/// previous rule. Listings are sorted by name so they do not depend on
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct OperatorRegisterer {
    alerts: HashMap<String, AlertRule>,
    recording_rules: HashMap<String, RecordingRule>,
}

impl OperatorRegisterer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every alert of every group
    pub fn register_alerts<I, G>(&mut self, groups: I)
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = AlertRule>,
    {
        for alert in groups.into_iter().flatten() {
            debug!(alert = %alert.alert, "registering alert");
            let name = alert.alert.clone();
            if let Some(previous) = self.alerts.insert(name, alert) {
                warn!(alert = %previous.alert, "alert registered twice, keeping the latest definition");
            }
        }
    }

    /// Register every recording rule of every group
    pub fn register_recording_rules<I, G>(&mut self, groups: I)
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = RecordingRule>,
    {
        for rule in groups.into_iter().flatten() {
            debug!(record = %rule.name, "registering recording rule");
            let name = rule.name.clone();
            if let Some(previous) = self.recording_rules.insert(name, rule) {
                warn!(record = %previous.name, "recording rule registered twice, keeping the latest definition");
            }
        }
    }

    /// Registered alerts, sorted by alert name
    pub fn list_alerts(&self) -> Vec<AlertRule> {
        let mut alerts: Vec<AlertRule> = self.alerts.values().cloned().collect();
        alerts.sort_by(|a, b| a.alert.cmp(&b.alert));
        alerts
    }

    /// Registered recording rules, sorted by name
    pub fn list_recording_rules(&self) -> Vec<RecordingRule> {
        let mut rules: Vec<RecordingRule> = self.recording_rules.values().cloned().collect();
        rules.sort_by(|a, b| a.name.cmp(&b.name));
        rules
    }

    /// Drop every registered rule
    pub fn clean_registry(&mut self) {
        self.alerts.clear();
        self.recording_rules.clear();
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    pub fn recording_rule_count(&self) -> usize {
        self.recording_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty() && self.recording_rules.is_empty()
    }
}

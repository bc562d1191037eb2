//! Markdown documentation for recorded metrics

use crate::types::RecordingRule;

const HEADER: &str = "# Cluster Network Addons Operator metrics\n\n\
This document is generated from the operator's recording rules.\n";

/// Render one section per rule, in the order given
pub fn metrics_doc(rules: &[RecordingRule]) -> String {
    let mut doc = String::from(HEADER);
    for rule in rules {
        doc.push_str(&format!(
            "\n### {}\n{}. Type: {}.\n",
            rule.name,
            rule.help.trim_end_matches('.'),
            rule.metric_type
        ));
    }
    doc
}

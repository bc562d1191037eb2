//! Monitoring errors

/// Errors raised while configuring or rendering operator rules
#[derive(Debug, thiserror::Error)]
pub enum MonitoringError {
    #[error("invalid runbook URL template {template:?}: expected exactly one %s placeholder, found {found}")]
    InvalidRunbookTemplate { template: String, found: usize },

    #[error("RUNBOOK_URL_TEMPLATE is not valid unicode")]
    NonUnicodeRunbookTemplate,

    #[error("failed to render PrometheusRule: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("failed to serialize rule spec: {0}")]
    Serialize(#[from] serde_json::Error),
}

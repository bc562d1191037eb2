//! Runbook URL template resolution

use crate::error::MonitoringError;
use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;

pub const RUNBOOK_URL_TEMPLATE_ENV: &str = "RUNBOOK_URL_TEMPLATE";
pub const DEFAULT_RUNBOOK_URL_TEMPLATE: &str = "https://kubevirt.io/monitoring/runbooks/%s";
pub const RUNBOOK_PLACEHOLDER: &str = "%s";

/// URL pattern with a single `%s` slot for the alert name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunbookTemplate(String);

impl RunbookTemplate {
    /// Validate a template; it must contain the placeholder exactly once
    pub fn parse(template: impl Into<String>) -> Result<Self, MonitoringError> {
        let template = template.into();
        let found = template.matches(RUNBOOK_PLACEHOLDER).count();
        if found != 1 {
            return Err(MonitoringError::InvalidRunbookTemplate { template, found });
        }
        Ok(Self(template))
    }

    /// Resolve from `RUNBOOK_URL_TEMPLATE`, falling back to the built-in default
    pub fn from_env() -> Result<Self, MonitoringError> {
        Self::resolve(std::env::var_os(RUNBOOK_URL_TEMPLATE_ENV))
    }

    fn resolve(value: Option<OsString>) -> Result<Self, MonitoringError> {
        match value {
            Some(raw) => {
                let template = raw
                    .into_string()
                    .map_err(|_| MonitoringError::NonUnicodeRunbookTemplate)?;
                Self::parse(template)
            }
            None => Self::parse(DEFAULT_RUNBOOK_URL_TEMPLATE),
        }
    }

    /// Runbook URL for the given alert
    pub fn url_for(&self, alert: &str) -> String {
        self.0.replacen(RUNBOOK_PLACEHOLDER, alert, 1)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunbookTemplate {
    fn default() -> Self {
        Self(DEFAULT_RUNBOOK_URL_TEMPLATE.to_string())
    }
}

impl FromStr for RunbookTemplate {
    type Err = MonitoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RunbookTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

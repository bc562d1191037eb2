//! Verification errors

use crate::verifier::Stage;
use cnao_monitoring::MonitoringError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("rule generation failed: {0}")]
    Rules(#[from] MonitoringError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} failed (exit code: {code:?})")]
    CommandFailed { stage: Stage, code: Option<i32> },

    #[error("{stage} did not finish within {timeout:?}")]
    Timeout { stage: Stage, timeout: Duration },
}

impl VerifyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

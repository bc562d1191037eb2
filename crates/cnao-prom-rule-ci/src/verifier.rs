//! # Rule verifier
//!
//! Runs the stages of a verification in order and always removes the
//! materialized rule file afterwards, whichever stage failed.

use crate::config::VerifierConfig;
use crate::engine::RuleEngine;
use crate::error::VerifyError;
use cnao_monitoring::{build_prometheus_rule, setup_rules_with_template, OperatorRegisterer, RunbookTemplate};
use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

/// Verification stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SetupRules,
    BuildRuleset,
    SerializeToFile,
    Lint,
    UnitTest,
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::SetupRules => "setup rules",
            Stage::BuildRuleset => "build ruleset",
            Stage::SerializeToFile => "serialize to file",
            Stage::Lint => "lint",
            Stage::UnitTest => "unit test",
            Stage::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

pub struct Verifier {
    config: VerifierConfig,
    engine: Box<dyn RuleEngine>,
    runbook: Option<RunbookTemplate>,
}

impl Verifier {
    pub fn new(config: VerifierConfig, engine: Box<dyn RuleEngine>) -> Self {
        Self {
            config,
            engine,
            runbook: None,
        }
    }

    /// Use this template instead of resolving `RUNBOOK_URL_TEMPLATE`
    pub fn with_runbook_template(mut self, runbook: RunbookTemplate) -> Self {
        self.runbook = Some(runbook);
        self
    }

    /// Materialize, lint and unit test the rules, then delete the rule file
    pub async fn verify(&self) -> Result<(), VerifyError> {
        info!(
            target_file = %self.config.target_file.display(),
            tests_file = %self.config.tests_file.display(),
            "verifying prometheus rules"
        );

        let outcome = self.run_stages().await;
        let cleanup = self.cleanup().await;

        match (outcome, cleanup) {
            (Ok(()), cleanup) => cleanup,
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                error!(error = %cleanup_err, "cleanup failed after an earlier error");
                Err(e)
            }
        }
    }

    async fn run_stages(&self) -> Result<(), VerifyError> {
        let target = self.config.target_file.as_path();

        info!(stage = %Stage::SetupRules, namespace = %self.config.namespace);
        let runbook = match &self.runbook {
            Some(runbook) => runbook.clone(),
            None => RunbookTemplate::from_env()?,
        };
        let mut registry = OperatorRegisterer::new();
        setup_rules_with_template(&mut registry, &self.config.namespace, &runbook);

        info!(stage = %Stage::BuildRuleset);
        let rule = build_prometheus_rule(&registry, &self.config.namespace);

        info!(stage = %Stage::SerializeToFile, path = %target.display());
        let contents = rule.spec.to_json()?;
        write_atomically(target, &contents)?;

        info!(stage = %Stage::Lint);
        self.engine.check_rules(target).await?;

        info!(stage = %Stage::UnitTest);
        self.engine.test_rules(target, &self.config.tests_file).await?;

        info!("prometheus rules verified");
        Ok(())
    }

    async fn cleanup(&self) -> Result<(), VerifyError> {
        let target = &self.config.target_file;
        debug!(stage = %Stage::Cleanup, path = %target.display());

        match tokio::fs::remove_file(target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VerifyError::io(target, e)),
        }
    }
}

/// Write `contents` to a temporary file next to `path` and rename it into place
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), VerifyError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| VerifyError::io(dir, e))?;
    file.write_all(contents).map_err(|e| VerifyError::io(file.path(), e))?;
    file.as_file().sync_all().map_err(|e| VerifyError::io(file.path(), e))?;

    // promtool runs as an unprivileged user inside the container
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| VerifyError::io(file.path(), e))?;
    }

    file.persist(path).map_err(|e| VerifyError::io(path, e.error))?;
    Ok(())
}

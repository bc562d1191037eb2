//! Rule evaluation engines

use crate::config::VerifierConfig;
use crate::error::VerifyError;
use crate::verifier::Stage;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

pub const PROMTOOL_ENTRYPOINT: &str = "/bin/promtool";
pub const CONTAINER_RULES_PATH: &str = "/tmp/rules.verify";
pub const CONTAINER_TESTS_PATH: &str = "/tmp/rules.test";

/// Something that can lint and unit test a rule file
#[async_trait]
pub trait RuleEngine: Send + Sync {
    /// `promtool check rules`
    async fn check_rules(&self, rules: &Path) -> Result<(), VerifyError>;

    /// `promtool test rules` with the rule file available to the tests
    async fn test_rules(&self, rules: &Path, tests: &Path) -> Result<(), VerifyError>;
}

/// promtool from a Prometheus image, run through docker or podman
#[derive(Debug, Clone)]
pub struct ContainerPromtool {
    oci_bin: PathBuf,
    image: String,
    timeout: Duration,
}

impl ContainerPromtool {
    pub fn new(oci_bin: impl Into<PathBuf>, image: impl Into<String>, timeout: Duration) -> Self {
        Self {
            oci_bin: oci_bin.into(),
            image: image.into(),
            timeout,
        }
    }

    pub fn from_config(config: &VerifierConfig) -> Self {
        Self::new(&config.oci_bin, &config.image, config.timeout)
    }

    /// Arguments for the lint run
    pub fn check_args(&self, rules: &Path) -> Vec<String> {
        let mut args = self.run_prefix(Stage::Lint);
        args.extend(volume(rules, CONTAINER_RULES_PATH));
        args.push(self.image.clone());
        args.extend(["check", "rules", CONTAINER_RULES_PATH].map(String::from));
        args
    }

    /// Arguments for the unit test run
    pub fn test_args(&self, rules: &Path, tests: &Path) -> Vec<String> {
        let mut args = self.run_prefix(Stage::UnitTest);
        args.extend(volume(tests, CONTAINER_TESTS_PATH));
        args.extend(volume(rules, CONTAINER_RULES_PATH));
        args.push(self.image.clone());
        args.extend(["test", "rules", CONTAINER_TESTS_PATH].map(String::from));
        args
    }

    /// Name given to the container of a stage, so it can be removed if the client is killed
    pub fn container_name(&self, stage: Stage) -> String {
        let suffix = match stage {
            Stage::UnitTest => "test",
            _ => "check",
        };
        format!("prom-rule-ci-{}-{suffix}", std::process::id())
    }

    /// Arguments that force-remove a stage's container
    pub fn remove_args(&self, stage: Stage) -> Vec<String> {
        vec!["rm".to_string(), "-f".to_string(), self.container_name(stage)]
    }

    fn run_prefix(&self, stage: Stage) -> Vec<String> {
        vec![
            "run".to_string(),
            "--rm".to_string(),
            format!("--name={}", self.container_name(stage)),
            format!("--entrypoint={PROMTOOL_ENTRYPOINT}"),
        ]
    }

    async fn run(&self, stage: Stage, args: Vec<String>) -> Result<(), VerifyError> {
        debug!(%stage, program = %self.oci_bin.display(), ?args, "running promtool");

        let mut child = Command::new(&self.oci_bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| VerifyError::Spawn {
                program: self.oci_bin.clone(),
                source,
            })?;

        let waited = tokio::time::timeout(self.timeout, child.wait()).await;
        let status = match waited {
            Ok(status) => status.map_err(|e| VerifyError::io(&self.oci_bin, e))?,
            Err(_) => {
                if let Err(e) = child.kill().await {
                    warn!(%stage, error = %e, "failed to kill timed out promtool container");
                }
                // killing the client leaves a docker container running
                self.remove_container(stage).await;
                return Err(VerifyError::Timeout {
                    stage,
                    timeout: self.timeout,
                });
            }
        };

        if !status.success() {
            return Err(VerifyError::CommandFailed {
                stage,
                code: status.code(),
            });
        }
        Ok(())
    }

    async fn remove_container(&self, stage: Stage) {
        let removed = Command::new(&self.oci_bin)
            .args(self.remove_args(stage))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        match removed {
            Ok(status) if status.success() => debug!(%stage, "removed timed out promtool container"),
            Ok(status) => warn!(%stage, code = ?status.code(), "failed to remove timed out promtool container"),
            Err(e) => warn!(%stage, error = %e, "failed to remove timed out promtool container"),
        }
    }
}

#[async_trait]
impl RuleEngine for ContainerPromtool {
    async fn check_rules(&self, rules: &Path) -> Result<(), VerifyError> {
        let rules = absolute(rules)?;
        self.run(Stage::Lint, self.check_args(&rules)).await
    }

    async fn test_rules(&self, rules: &Path, tests: &Path) -> Result<(), VerifyError> {
        let rules = absolute(rules)?;
        let tests = absolute(tests)?;
        self.run(Stage::UnitTest, self.test_args(&rules, &tests)).await
    }
}

fn volume(host: &Path, container: &str) -> [String; 2] {
    ["-v".to_string(), format!("{}:{container}:ro,Z", host.display())]
}

/// Bind mounts need absolute host paths
fn absolute(path: &Path) -> Result<PathBuf, VerifyError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| VerifyError::io(path, e))?;
    Ok(cwd.join(path))
}

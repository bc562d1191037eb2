//! Verifier configuration

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PROMETHEUS_IMAGE: &str = "quay.io/prometheus/prometheus:v2.44.0";
pub const DEFAULT_NAMESPACE: &str = "ci";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Settings for one verification run
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    pub oci_bin: PathBuf,
    pub target_file: PathBuf,
    pub tests_file: PathBuf,
    /// Image providing `/bin/promtool`
    pub image: String,
    /// Namespace the recording rules are rendered for
    pub namespace: String,
    /// Deadline for each promtool invocation
    pub timeout: Duration,
}

impl VerifierConfig {
    pub fn new(oci_bin: impl Into<PathBuf>, target_file: impl Into<PathBuf>, tests_file: impl Into<PathBuf>) -> Self {
        Self {
            oci_bin: oci_bin.into(),
            target_file: target_file.into(),
            tests_file: tests_file.into(),
            image: DEFAULT_PROMETHEUS_IMAGE.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn builder(
        oci_bin: impl Into<PathBuf>,
        target_file: impl Into<PathBuf>,
        tests_file: impl Into<PathBuf>,
    ) -> VerifierConfigBuilder {
        VerifierConfigBuilder {
            config: Self::new(oci_bin, target_file, tests_file),
        }
    }
}

/// Fluent overrides on top of the defaults
pub struct VerifierConfigBuilder {
    config: VerifierConfig,
}

impl VerifierConfigBuilder {
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.config.image = image.into();
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn build(self) -> VerifierConfig {
        self.config
    }
}

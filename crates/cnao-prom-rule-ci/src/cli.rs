//! Command line arguments

use crate::config::VerifierConfig;
use clap::Parser;
use std::path::PathBuf;

/// Verify the operator's Prometheus rules with promtool
#[derive(Parser, Debug)]
#[command(name = "prom-rule-ci")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Container runtime binary (docker, podman)
    pub oci_bin: PathBuf,

    /// File the rules are written to
    pub target_file: PathBuf,

    /// promtool rule unit test file
    pub tests_file: PathBuf,
}

impl From<Cli> for VerifierConfig {
    fn from(cli: Cli) -> Self {
        VerifierConfig::new(cli.oci_bin, cli.target_file, cli.tests_file)
    }
}

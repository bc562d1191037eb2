//! prom-rule-ci entry point

use anyhow::{Context, Result};
use clap::Parser;
use cnao_prom_rule_ci::{Cli, ContainerPromtool, Verifier, VerifierConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // exits with a usage error unless exactly three arguments are given
    let cli = Cli::parse();
    let config = VerifierConfig::from(cli);
    let engine = ContainerPromtool::from_config(&config);

    Verifier::new(config, Box::new(engine))
        .verify()
        .await
        .context("prometheus rule verification failed")
}

//! Print markdown documentation for the operator's recorded metrics

use anyhow::Result;
use cnao_monitoring::docs::metrics_doc;
use cnao_monitoring::{setup_rules, OperatorRegisterer};
use std::io::Write;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut registry = OperatorRegisterer::new();
    setup_rules(&mut registry, "<namespace>")?;

    let doc = metrics_doc(&registry.list_recording_rules());
    std::io::stdout().write_all(doc.as_bytes())?;
    Ok(())
}

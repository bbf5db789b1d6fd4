//! Release note preview command implementation.
use log::*;

use crate::{
    Result,
    cli::{Args, ThanksArgs},
    command::common,
    orchestrator::Orchestrator,
};

/// Prints the notes a release of `version` would publish, as markdown or
/// JSON. Nothing is changed.
pub async fn execute(
    args: &Args,
    version: &str,
    labels: &[String],
    json: bool,
    thanks: &ThanksArgs,
) -> Result<()> {
    let setup = common::setup(args, version, thanks).await?;

    let orchestrator = Orchestrator::builder()
        .config(setup.config)
        .forge(setup.forge)
        .build()?;

    let notes = orchestrator.release_notes(labels).await?;

    info!(
        "generated {} entries in {} sections",
        notes.entry_count(),
        notes.sections.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else {
        println!("{}", notes.to_markdown());
    }

    Ok(())
}

//! Full release run command implementation.
use log::*;
use std::rc::Rc;

use crate::{
    Result,
    cli::{Args, ThanksArgs},
    command::common,
    orchestrator::{Orchestrator, Outcome, TermPrompt},
    repo::{Credentials, ForkClone},
};

/// Drives the release through every phase, asking the operator to confirm
/// along the way. The fork is cloned once the inputs are confirmed.
pub async fn execute(
    args: &Args,
    version: &str,
    thanks: &ThanksArgs,
) -> Result<()> {
    let setup = common::setup(args, version, thanks).await?;
    let config = Rc::clone(&setup.config);

    let credentials = Credentials {
        username: config.fork_owner.clone(),
        token: config.token.clone(),
    };

    let mut fork = ForkClone::new(
        &setup.remote_config.clone_url(&config.fork_owner),
        &config.trunk_branch,
        &credentials,
    );

    let orchestrator = Orchestrator::builder()
        .config(setup.config)
        .forge(setup.forge)
        .build()?;

    match orchestrator.run(&mut fork, &TermPrompt).await? {
        Outcome::Cancelled => {
            warn!("release of {} cancelled", config.version);
        }
        Outcome::Completed(report) => {
            info!(
                "release of {} complete: {} pull requests, draft release {}",
                config.version,
                report.pull_requests.len(),
                report.release_url.unwrap_or_default()
            );
        }
    }

    Ok(())
}

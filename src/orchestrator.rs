//! Release run orchestration.
//!
//! Drives a release through its phases: confirm the inputs, cut the release
//! branch, bump the version on it, wait for the merge, publish the draft
//! release notes, wait for the publish, then bump the development versions
//! on the release branch and on trunk. Any error ends the run; it is never
//! retried.
use derive_builder::Builder;
use log::*;
use std::{collections::HashSet, rc::Rc};

use crate::{
    ReleaseBotError, Result,
    bump::{ReleasePlanStep, VersionBump},
    config::ReleaseConfig,
    forge::{manager::ForgeManager, types::CreateReleaseRequest},
    notes::{
        Filters, generate_notes, thanks::ThanksFilter,
        types::ReleaseNoteDocument,
    },
    repo::VersionControl,
};

pub mod phase;
pub mod prompt;

pub use phase::Phase;
pub use prompt::{Prompt, TermPrompt};

/// Printed once every phase has completed.
pub const FOLLOW_UP_REMINDER: &str = "Not done yet: send the release \
announcement emails and add the compatibility test for this version.";

/// URLs of everything a completed run created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    pub pull_requests: Vec<String>,
    pub release_url: Option<String>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operator rejected the inputs; nothing was changed.
    Cancelled,
    Completed(ReleaseReport),
}

#[derive(Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct OrchestratorParams {
    pub config: Rc<ReleaseConfig>,
    pub forge: Rc<ForgeManager>,
}

impl OrchestratorParamsBuilder {
    pub fn build(&self) -> Result<Orchestrator> {
        let params = self._build().map_err(|e| {
            ReleaseBotError::invalid_config(format!(
                "Failed to build orchestrator: {}",
                e
            ))
        })?;
        Ok(Orchestrator::new(params))
    }
}

pub struct Orchestrator {
    config: Rc<ReleaseConfig>,
    forge: Rc<ForgeManager>,
    bump: VersionBump,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorParamsBuilder {
        OrchestratorParamsBuilder::default()
    }

    pub fn new(params: OrchestratorParams) -> Self {
        Self {
            config: Rc::clone(&params.config),
            forge: Rc::clone(&params.forge),
            bump: VersionBump::new(
                Rc::clone(&params.config),
                Rc::clone(&params.forge),
            ),
        }
    }

    /// Runs every phase in order. Returns `Outcome::Cancelled` when the
    /// operator rejects the inputs.
    pub async fn run(
        &self,
        vcs: &mut dyn VersionControl,
        prompt: &dyn Prompt,
    ) -> Result<Outcome> {
        let version = &self.config.version;
        let release_branch = version.release_branch();
        let trunk = self.config.trunk_branch.clone();

        let mut report = ReleaseReport::default();
        let mut phase = Phase::ValidateInput;

        while phase != Phase::Done {
            info!("phase: {phase}");

            match phase {
                Phase::ValidateInput => {
                    println!("{}", self.config.summary_table());
                    if !prompt.confirm("Looks right?")? {
                        info!("inputs rejected: nothing was changed");
                        return Ok(Outcome::Cancelled);
                    }
                }
                Phase::EnsureReleaseBranch => {
                    self.forge
                        .ensure_upstream_branch(&release_branch, &trunk)
                        .await?;
                }
                Phase::BumpVersionForRelease => {
                    let step = ReleasePlanStep::new(
                        &release_branch,
                        &version.to_string(),
                        &trunk,
                    );
                    let url = self.bump_version(vcs, &step).await?;
                    report.pull_requests.push(url);
                }
                Phase::AwaitMerge => {
                    wait_for_confirmation(prompt, "Merged?")?;
                }
                Phase::GenerateAndPublishNotes => {
                    let url = self.publish_notes().await?;
                    println!("draft release: {url}");
                    report.release_url = Some(url);
                }
                Phase::AwaitPublish => {
                    wait_for_confirmation(prompt, "Published?")?;
                }
                Phase::BumpVersionPostRelease => {
                    let step = ReleasePlanStep::new(
                        &release_branch,
                        &version.post_release_version(),
                        &trunk,
                    );
                    let url = self.bump_version(vcs, &step).await?;
                    report.pull_requests.push(url);
                }
                Phase::BumpVersionNextMinor => {
                    let step = ReleasePlanStep::new(
                        &trunk,
                        &version.next_minor_version(),
                        &trunk,
                    );
                    let url = self.bump_version(vcs, &step).await?;
                    report.pull_requests.push(url);
                }
                Phase::Done => {}
            }

            phase = phase.next();
        }

        println!("{FOLLOW_UP_REMINDER}");

        Ok(Outcome::Completed(report))
    }

    /// Generates the release notes for the configured version. Merged pull
    /// requests come from the version's milestone, or from `labels` when
    /// any are given. Organization members are only fetched when special
    /// thanks are enabled.
    pub async fn release_notes(
        &self,
        labels: &[String],
    ) -> Result<ReleaseNoteDocument> {
        let version = &self.config.version;
        let thanks = &self.config.thanks;

        let records = async {
            if labels.is_empty() {
                self.forge
                    .merged_prs_for_milestone(&version.milestone_title())
                    .await
            } else {
                self.forge.merged_prs_for_labels(labels.to_vec()).await
            }
        };

        let members = async {
            if thanks.enabled {
                self.forge.list_org_members(&self.config.org).await
            } else {
                Ok(HashSet::new())
            }
        };

        let (records, members) = tokio::try_join!(records, members)?;

        debug!("{} organization members", members.len());

        let thanks_filter = ThanksFilter::new(members, thanks);
        let mut filters = Filters::default();
        if thanks.enabled {
            filters = filters.with_special_thanks(|r| {
                thanks_filter.is_thanked(&r.author.login)
            });
        }

        Ok(generate_notes(
            &self.config.upstream_owner,
            &self.config.repo,
            &version.tag(),
            &records,
            &filters,
        ))
    }

    ////////////////////////////////////////////////////////////////////////////
    //// private
    ////////////////////////////////////////////////////////////////////////////

    async fn bump_version(
        &self,
        vcs: &mut dyn VersionControl,
        step: &ReleasePlanStep,
    ) -> Result<String> {
        info!(
            "bumping version to {} on {}",
            step.version, step.target_branch
        );
        let url = self.bump.run(vcs, step).await?;
        println!("pull request: {url}");
        Ok(url)
    }

    async fn publish_notes(&self) -> Result<String> {
        let version = &self.config.version;
        let notes = self.release_notes(&[]).await?;

        info!(
            "release notes: {} entries in {} sections",
            notes.entry_count(),
            notes.sections.len()
        );

        self.forge
            .create_draft_release(CreateReleaseRequest {
                tag: version.tag(),
                target_branch: version.release_branch(),
                title: version.release_title(),
                body: notes.to_markdown(),
            })
            .await
    }
}

/// Asks until the operator answers yes.
fn wait_for_confirmation(prompt: &dyn Prompt, message: &str) -> Result<()> {
    while !prompt.confirm(message)? {
        info!("waiting: {message}");
    }
    Ok(())
}

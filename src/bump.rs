//! Version-bump pull requests.
//!
//! A bump always starts from trunk: check out trunk, check out (or create)
//! `release_version_{version}`, rewrite the version file, commit, push to
//! the fork and open a pull request against the target branch upstream.
//! Every step is safe to repeat, so a failed bump can simply be run again.
use log::*;
use std::rc::Rc;

use crate::{
    ReleaseBotError, Result,
    config::ReleaseConfig,
    forge::{manager::ForgeManager, types::CreatePrRequest},
    repo::{Credentials, VersionControl},
};

/// Appended to bump commits that do not target trunk.
pub const SKIP_CI_MARKER: &str =
    "\n\n[skip ci] Skipping CI. Version number change only";

/// One version-bump request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlanStep {
    pub target_branch: String,
    pub version: String,
    pub skip_ci: bool,
}

impl ReleasePlanStep {
    /// CI is skipped for every target except trunk.
    pub fn new(target_branch: &str, version: &str, trunk_branch: &str) -> Self {
        Self {
            target_branch: target_branch.to_string(),
            version: version.to_string(),
            skip_ci: target_branch != trunk_branch,
        }
    }

    /// Fork branch the change is pushed to.
    pub fn working_branch(&self) -> String {
        format!("release_version_{}", self.version)
    }

    pub fn title(&self) -> String {
        format!("Change version to {}", self.version)
    }

    pub fn commit_message(&self) -> String {
        let mut msg = self.title();
        if self.skip_ci {
            msg.push_str(SKIP_CI_MARKER);
        }
        msg
    }
}

/// Renders the version file with `{"version": <version>}`.
pub fn render_version_file(template: &str, version: &str) -> Result<String> {
    let mut context = tera::Context::new();
    context.insert("version", version);
    Ok(tera::Tera::one_off(template, &context, false)?)
}

pub struct VersionBump {
    config: Rc<ReleaseConfig>,
    forge: Rc<ForgeManager>,
}

impl VersionBump {
    pub fn new(config: Rc<ReleaseConfig>, forge: Rc<ForgeManager>) -> Self {
        Self { config, forge }
    }

    /// Commits the version change, pushes it to the fork and opens the pull
    /// request. Returns the pull request URL. Stops at the first error.
    pub async fn run(
        &self,
        vcs: &mut dyn VersionControl,
        step: &ReleasePlanStep,
    ) -> Result<String> {
        let branch = step.working_branch();

        vcs.checkout_or_create_branch(&self.config.trunk_branch)?;
        vcs.checkout_or_create_branch(&branch)?;

        if step.version.trim().is_empty() {
            return Err(ReleaseBotError::EmptyVersion);
        }

        let content =
            render_version_file(&self.config.version_template, &step.version)?;

        let committed = vcs.write_file_and_commit(
            &self.config.version_file,
            &content,
            &step.commit_message(),
            &self.config.author,
        )?;

        if committed {
            debug!("diff against parent:\n{}", vcs.diff_against_parent()?);
        }

        let credentials = Credentials {
            username: self.config.fork_owner.clone(),
            token: self.config.token.clone(),
        };

        vcs.push(&branch, &credentials)?;

        let url = self
            .forge
            .create_pr(CreatePrRequest {
                head_owner: self.config.fork_owner.clone(),
                head_branch: branch,
                base_branch: step.target_branch.clone(),
                title: step.title(),
                body: "".into(),
            })
            .await?;

        info!("opened pull request {url}");

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        forge::traits::MockForge,
        repo::MockVersionControl,
        test_helpers::{create_test_release_config, create_test_remote_config},
    };
    use mockall::{Sequence, predicate::eq};

    fn bump(mock_forge: MockForge) -> VersionBump {
        VersionBump::new(
            Rc::new(create_test_release_config()),
            Rc::new(ForgeManager::new(Box::new(mock_forge))),
        )
    }

    fn mock_forge() -> MockForge {
        let mut mock = MockForge::new();
        mock.expect_remote_config()
            .returning(create_test_remote_config);
        mock
    }

    #[test]
    fn plan_step_skips_ci_off_trunk() {
        let step = ReleasePlanStep::new("v1.14.x", "1.14.2", "master");
        assert!(step.skip_ci);
        assert_eq!(step.working_branch(), "release_version_1.14.2");
        assert_eq!(
            step.commit_message(),
            format!("Change version to 1.14.2{SKIP_CI_MARKER}")
        );

        let step = ReleasePlanStep::new("master", "1.15.0-dev", "master");
        assert!(!step.skip_ci);
        assert_eq!(step.commit_message(), "Change version to 1.15.0-dev");
    }

    #[test]
    fn renders_version_template() {
        let content =
            render_version_file("const Version = \"{{ version }}\"\n", "1.2.3-dev")
                .unwrap();
        assert_eq!(content, "const Version = \"1.2.3-dev\"\n");
    }

    #[tokio::test]
    async fn run_commits_pushes_and_opens_pr_in_order() {
        let mut seq = Sequence::new();
        let mut vcs = MockVersionControl::new();

        vcs.expect_checkout_or_create_branch()
            .with(eq("master"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        vcs.expect_checkout_or_create_branch()
            .with(eq("release_version_1.14.2"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        vcs.expect_write_file_and_commit()
            .withf(|path, content, message, author| {
                path == "version.go"
                    && content.contains("const Version = \"1.14.2\"")
                    && message.starts_with("Change version to 1.14.2")
                    && message.contains("[skip ci]")
                    && author.email == "releasebot@example.com"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| Ok(true));
        vcs.expect_diff_against_parent()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok("+const Version = \"1.14.2\"".into()));
        vcs.expect_push()
            .withf(|branch, creds| {
                branch == "release_version_1.14.2" && creds.username == "octocat"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let mut forge = mock_forge();
        forge
            .expect_create_pr()
            .withf(|req| {
                req.head_owner == "octocat"
                    && req.head_branch == "release_version_1.14.2"
                    && req.base_branch == "v1.14.x"
                    && req.title == "Change version to 1.14.2"
            })
            .times(1)
            .returning(|_| Ok("https://github.com/grpc/grpc-go/pull/1".into()));

        let step = ReleasePlanStep::new("v1.14.x", "1.14.2", "master");
        let url = bump(forge).run(&mut vcs, &step).await.unwrap();

        assert_eq!(url, "https://github.com/grpc/grpc-go/pull/1");
    }

    #[tokio::test]
    async fn run_rejects_empty_version_before_writing() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_checkout_or_create_branch()
            .times(2)
            .returning(|_| Ok(()));
        vcs.expect_write_file_and_commit().times(0);
        vcs.expect_push().times(0);

        let mut forge = mock_forge();
        forge.expect_create_pr().times(0);

        let step = ReleasePlanStep::new("master", "", "master");
        let err = bump(forge).run(&mut vcs, &step).await.unwrap_err();

        assert!(matches!(err, ReleaseBotError::EmptyVersion));
    }

    #[tokio::test]
    async fn run_stops_at_first_error() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_checkout_or_create_branch()
            .returning(|_| Ok(()));
        vcs.expect_write_file_and_commit()
            .returning(|_, _, _, _| Ok(true));
        vcs.expect_diff_against_parent()
            .returning(|| Ok(String::new()));
        vcs.expect_push()
            .returning(|_, _| Err(ReleaseBotError::forge("auth failed")));

        let mut forge = mock_forge();
        forge.expect_create_pr().times(0);

        let step = ReleasePlanStep::new("v1.14.x", "1.14.3-dev", "master");
        let result = bump(forge).run(&mut vcs, &step).await;

        assert!(matches!(result, Err(ReleaseBotError::ForgeError(_))));
    }

    #[tokio::test]
    async fn rerun_with_unchanged_file_still_pushes_and_opens_pr() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_checkout_or_create_branch()
            .returning(|_| Ok(()));
        vcs.expect_write_file_and_commit()
            .returning(|_, _, _, _| Ok(false));
        vcs.expect_diff_against_parent().times(0);
        vcs.expect_push().times(1).returning(|_, _| Ok(()));

        let mut forge = mock_forge();
        forge
            .expect_create_pr()
            .times(1)
            .returning(|_| Ok("https://github.com/grpc/grpc-go/pull/2".into()));

        let step = ReleasePlanStep::new("master", "1.15.0-dev", "master");
        let url = bump(forge).run(&mut vcs, &step).await.unwrap();

        assert_eq!(url, "https://github.com/grpc/grpc-go/pull/2");
    }
}

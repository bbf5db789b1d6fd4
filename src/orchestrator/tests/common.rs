//! Common test utilities for orchestrator tests.

use std::rc::Rc;

use crate::{
    config::{ReleaseConfig, ThanksConfig},
    forge::{manager::ForgeManager, traits::MockForge, types::Issue},
    orchestrator::{Orchestrator, prompt::MockPrompt},
    repo::MockVersionControl,
    test_helpers::{
        create_test_pr_issue, create_test_release_config,
        create_test_remote_config,
    },
};

pub const MILESTONE_NUMBER: u64 = 12;

/// MockForge with the remote config expectation every ForgeManager needs.
pub fn mock_forge() -> MockForge {
    let mut mock = MockForge::new();
    mock.expect_remote_config()
        .returning(create_test_remote_config);
    mock
}

/// Creates a test Orchestrator releasing 1.14.2 with the provided mock
/// forge. Set expectations on the mock before calling this.
pub fn create_test_orchestrator(mock_forge: MockForge) -> Orchestrator {
    create_orchestrator_with_config(mock_forge, create_test_release_config())
}

/// Same as [`create_test_orchestrator`] with special thanks configured
/// explicitly.
pub fn create_test_orchestrator_with_thanks(
    mock_forge: MockForge,
    thanks: ThanksConfig,
) -> Orchestrator {
    let mut config = create_test_release_config();
    config.thanks = thanks;
    create_orchestrator_with_config(mock_forge, config)
}

fn create_orchestrator_with_config(
    mock_forge: MockForge,
    config: ReleaseConfig,
) -> Orchestrator {
    Orchestrator::builder()
        .config(Rc::new(config))
        .forge(Rc::new(ForgeManager::new(Box::new(mock_forge))))
        .build()
        .unwrap()
}

/// Version control mock where every operation succeeds.
pub fn accepting_vcs() -> MockVersionControl {
    let mut vcs = MockVersionControl::new();
    vcs.expect_checkout_or_create_branch()
        .returning(|_| Ok(()));
    vcs.expect_write_file_and_commit()
        .returning(|_, _, _, _| Ok(true));
    vcs.expect_diff_against_parent()
        .returning(|| Ok(String::new()));
    vcs.expect_push().returning(|_, _| Ok(()));
    vcs
}

/// Prompt mock answering yes to `message` exactly once.
pub fn expect_yes(prompt: &mut MockPrompt, message: &'static str) {
    prompt
        .expect_confirm()
        .withf(move |m| m == message)
        .times(1)
        .returning(|_| Ok(true));
}

/// Closed issues in the 1.14 milestone: a feature and a bug fix by an
/// outside contributor, an internal cleanup, a plain issue and a pull
/// request that was closed without merging.
pub fn milestone_issues() -> Vec<Issue> {
    let mut cleanup =
        create_test_pr_issue(3, "remove dead code", &["Type: Internal Cleanup"]);
    cleanup.author.login = "maintainer".into();

    let mut plain_issue = create_test_pr_issue(4, "question", &["Type: Bug"]);
    plain_issue.is_pull_request = false;

    let mut feature =
        create_test_pr_issue(1, "xds: add ring hash", &["Type: Feature"]);
    feature.author.login = "maintainer".into();

    vec![
        create_test_pr_issue(2, "transport: fix leak", &["Type: Bug"]),
        feature,
        cleanup,
        plain_issue,
        create_test_pr_issue(5, "abandoned", &["Type: Feature"]),
    ]
}

/// Expects the milestone lookup plus merge checks for
/// [`milestone_issues`]. Pull request 5 is reported unmerged.
pub fn expect_milestone_records(mock: &mut MockForge) {
    mock.expect_milestone_number()
        .withf(|title| title == "1.14 Release")
        .times(1)
        .returning(|_| Ok(MILESTONE_NUMBER));
    mock.expect_list_closed_issues()
        .times(1)
        .returning(|_| Ok(milestone_issues()));
    mock.expect_is_merged_pr()
        .returning(|number| Ok(number != 5));
}

use std::fmt;

/// Steps of a release run, in the only order they ever execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ValidateInput,
    EnsureReleaseBranch,
    BumpVersionForRelease,
    AwaitMerge,
    GenerateAndPublishNotes,
    AwaitPublish,
    BumpVersionPostRelease,
    BumpVersionNextMinor,
    Done,
}

impl Phase {
    /// The phase that follows this one. `Done` is terminal.
    pub fn next(self) -> Self {
        match self {
            Phase::ValidateInput => Phase::EnsureReleaseBranch,
            Phase::EnsureReleaseBranch => Phase::BumpVersionForRelease,
            Phase::BumpVersionForRelease => Phase::AwaitMerge,
            Phase::AwaitMerge => Phase::GenerateAndPublishNotes,
            Phase::GenerateAndPublishNotes => Phase::AwaitPublish,
            Phase::AwaitPublish => Phase::BumpVersionPostRelease,
            Phase::BumpVersionPostRelease => Phase::BumpVersionNextMinor,
            Phase::BumpVersionNextMinor => Phase::Done,
            Phase::Done => Phase::Done,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::ValidateInput => "validate input",
            Phase::EnsureReleaseBranch => "ensure release branch",
            Phase::BumpVersionForRelease => "bump version for release",
            Phase::AwaitMerge => "await merge",
            Phase::GenerateAndPublishNotes => "generate and publish notes",
            Phase::AwaitPublish => "await publish",
            Phase::BumpVersionPostRelease => "bump version post release",
            Phase::BumpVersionNextMinor => "bump version next minor",
            Phase::Done => "done",
        };
        write!(f, "{name}")
    }
}

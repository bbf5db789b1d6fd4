//! CLI argument parsing.
use clap::{Parser, Subcommand};
use secrecy::SecretString;

use crate::{
    ReleaseBotError, Result,
    config::{DEFAULT_TRUNK_BRANCH, DEFAULT_VERSION_FILE, ThanksConfig},
};

/// Repository released when `--repo` is not given.
pub const DEFAULT_REPO: &str = "grpc-go";
/// Organization that owns the real upstream repository.
pub const DEFAULT_ORG: &str = "grpc";

/// Global CLI arguments shared by every subcommand.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        default_value = "",
        global = true
    )]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub token: String,

    #[arg(long, default_value = DEFAULT_REPO, global = true)]
    /// Name of the repository being released.
    pub repo: String,

    #[arg(long, default_value = "", global = true)]
    /// Login owning the fork bump branches are pushed to. Defaults to the
    /// token's account.
    pub user: String,

    #[arg(long, default_value = "", global = true)]
    /// Commit author email. Defaults to the token account's primary email.
    pub email: String,

    #[arg(long, default_value = DEFAULT_ORG, global = true)]
    /// Organization owning the real upstream, also used for membership
    /// lookups.
    pub org: String,

    #[arg(long, default_value = "", global = true)]
    /// Owner of the staging upstream used without --no-kidding. Defaults to
    /// the fork user.
    pub staging_owner: String,

    #[arg(long, default_value_t = false, global = true)]
    /// Release against the real upstream owned by --org.
    pub no_kidding: bool,

    #[arg(long, default_value = DEFAULT_TRUNK_BRANCH, global = true)]
    /// Trunk branch release branches are cut from.
    pub trunk_branch: String,

    #[arg(long, default_value = DEFAULT_VERSION_FILE, global = true)]
    /// Path of the version file, relative to the repository root.
    pub version_file: String,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release operation subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full release: branch, version bumps, notes and draft release.
    Release {
        #[arg(long)]
        /// Version to release, e.g. 1.14.2.
        version: String,

        #[command(flatten)]
        thanks: ThanksArgs,
    },

    /// Print the release notes a release would publish without changing
    /// anything.
    Notes {
        #[arg(long)]
        /// Version the notes are generated for, e.g. 1.14.2.
        version: String,

        #[arg(long = "label")]
        /// Collect pull requests carrying these labels instead of the
        /// version's milestone. Repeatable.
        labels: Vec<String>,

        #[arg(long, default_value_t = false)]
        /// Print the notes as JSON instead of markdown.
        json: bool,

        #[command(flatten)]
        thanks: ThanksArgs,
    },
}

/// Special thanks options.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ThanksArgs {
    #[arg(long, default_value_t = false, overrides_with = "no_thanks")]
    /// Add "Special Thanks" lines for outside contributors (default).
    pub thanks: bool,

    #[arg(long, default_value_t = false, overrides_with = "thanks")]
    /// Do not add "Special Thanks" lines.
    pub no_thanks: bool,

    #[arg(long, default_value = "")]
    /// Comma separated logins never thanked.
    pub urwelcome: String,

    #[arg(long, default_value = "")]
    /// Comma separated logins always thanked, even organization members.
    pub verymuch: String,
}

impl ThanksArgs {
    pub fn config(&self) -> ThanksConfig {
        ThanksConfig::from_lists(!self.no_thanks, &self.urwelcome, &self.verymuch)
    }
}

impl Args {
    /// Resolved access token. Fails when neither --token nor GITHUB_TOKEN
    /// is set.
    pub fn token(&self) -> Result<SecretString> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(ReleaseBotError::invalid_args(
                "must set a GitHub token with --token or GITHUB_TOKEN",
            ));
        }
        Ok(SecretString::from(token.to_string()))
    }

    /// Owner of the upstream repository the release is made in: the
    /// organization with --no-kidding, otherwise the staging owner, which
    /// defaults to the fork user.
    pub fn upstream_owner(&self, fork_owner: &str) -> String {
        if self.no_kidding {
            return self.org.clone();
        }
        if !self.staging_owner.is_empty() {
            return self.staging_owner.clone();
        }
        fork_owner.to_string()
    }
}

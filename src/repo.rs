//! Local git clone used to make version-bump commits.
//!
//! The clone is made from the operator's fork and only ever holds the trunk
//! branch plus the short-lived `release_version_*` working branches created
//! from it. Changes reach the upstream through pull requests, never through
//! a direct push.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut repo = Repository::clone_fork("https://github.com/me/grpc-go", "master", &creds)?;
//! repo.checkout_or_create_branch("master")?;
//! repo.checkout_or_create_branch("release_version_1.14.0")?;
//! repo.write_file_and_commit("version.go", content, "Change version to 1.14.0", &author)?;
//! repo.push("release_version_1.14.0", &creds)?;
//! ```
use git2::{DiffFormat, RemoteCallbacks};
use log::*;
use secrecy::{ExposeSecret, SecretString};
use std::{fs, path::Path};
use tempfile::TempDir;

#[cfg(test)]
use mockall::automock;

use crate::{ReleaseBotError, Result, config::Author};

/// Name of the remote pointing at the operator's fork.
const FORK_REMOTE: &str = "origin";

/// Username/token pair used for authenticated git transport.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub token: SecretString,
}

/// Version-control operations the version-bump workflow needs.
#[cfg_attr(test, automock)]
pub trait VersionControl {
    /// Checks out `name`, creating it from HEAD first when it does not exist.
    /// An existing branch is checked out as is.
    fn checkout_or_create_branch(&mut self, name: &str) -> Result<()>;

    /// Replaces the contents of `path`, stages it and commits on the current
    /// branch. Returns `false` without committing when the file already
    /// holds `content`.
    fn write_file_and_commit(
        &mut self,
        path: &str,
        content: &str,
        message: &str,
        author: &Author,
    ) -> Result<bool>;

    /// Force pushes `branch` to the fork.
    fn push(&mut self, branch: &str, credentials: &Credentials) -> Result<()>;

    /// Patch between HEAD and its first parent.
    fn diff_against_parent(&self) -> Result<String>;
}

fn get_auth_callbacks<'r>(user: String, token: String) -> RemoteCallbacks<'r> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(move |_url, _username, _allowed| {
        git2::Cred::userpass_plaintext(&user, &token)
    });
    callbacks
}

/// git2 backed work tree.
pub struct Repository {
    repo: git2::Repository,
    // Keeps the clone directory alive for as long as the handle exists.
    _tempdir: Option<TempDir>,
}

impl Repository {
    /// Clones only `branch` of the fork into a temporary directory that is
    /// removed when the handle is dropped.
    pub fn clone_fork(
        url: &str,
        branch: &str,
        credentials: &Credentials,
    ) -> Result<Self> {
        info!("cloning {url} ({branch})");

        let tempdir = TempDir::new()?;

        let callbacks = get_auth_callbacks(
            credentials.username.clone(),
            credentials.token.expose_secret().to_string(),
        );

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        let mut builder = git2::build::RepoBuilder::new();
        let repo = builder
            .fetch_options(fetch_options)
            .branch(branch)
            .clone(url, tempdir.path())?;

        Ok(Self {
            repo,
            _tempdir: Some(tempdir),
        })
    }

    /// Opens an existing work tree.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = git2::Repository::open(path)?;
        Ok(Self {
            repo,
            _tempdir: None,
        })
    }

    pub fn workdir(&self) -> Result<&Path> {
        self.repo.workdir().ok_or_else(|| {
            ReleaseBotError::forge("Repository has no working directory")
        })
    }

    /// Short name of the checked out branch.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        Ok(head.shorthand().unwrap_or_default().to_string())
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_branch(name, git2::BranchType::Local) {
            Ok(_) => Ok(true),
            Err(err) if err.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn file_matches_head(&self, path: &str, content: &str) -> Result<bool> {
        let tree = self.repo.head()?.peel_to_tree()?;
        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(err) if err.code() == git2::ErrorCode::NotFound => {
                return Ok(false);
            }
            Err(err) => return Err(err.into()),
        };
        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;
        Ok(blob.content() == content.as_bytes())
    }
}

impl VersionControl for Repository {
    fn checkout_or_create_branch(&mut self, name: &str) -> Result<()> {
        let ref_name = format!("refs/heads/{name}");

        if self.branch_exists(name)? {
            info!("branch {name} exists: checking out");
        } else {
            info!("creating branch: {name}");
            let head = self.repo.head()?.peel_to_commit()?;
            self.repo.branch(name, &head, false)?;
        }

        let target = self.repo.revparse_single(&ref_name)?;
        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.safe();
        self.repo.checkout_tree(&target, Some(&mut checkout))?;
        self.repo.set_head(&ref_name)?;

        let head = self.repo.head()?.peel_to_commit()?;
        debug!("HEAD at {} ({})", head.id(), name);

        Ok(())
    }

    fn write_file_and_commit(
        &mut self,
        path: &str,
        content: &str,
        message: &str,
        author: &Author,
    ) -> Result<bool> {
        if self.file_matches_head(path, content)? {
            info!("{path} already up to date: nothing to commit");
            return Ok(false);
        }

        info!("writing {path}");
        fs::write(self.workdir()?.join(path), content)?;

        let mut index = self.repo.index()?;
        index.add_path(Path::new(path))?;
        index.write()?;

        debug!("committing changes with msg: {message}");
        let oid = index.write_tree()?;
        let tree = self.repo.find_tree(oid)?;
        let parent_commit = self.repo.head()?.peel_to_commit()?;
        let signature = git2::Signature::now(&author.name, &author.email)?;
        let commit = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent_commit],
        )?;

        info!("created commit {commit}");

        Ok(true)
    }

    fn push(&mut self, branch: &str, credentials: &Credentials) -> Result<()> {
        info!("pushing branch {branch}");

        let callbacks = get_auth_callbacks(
            credentials.username.clone(),
            credentials.token.expose_secret().to_string(),
        );
        let mut push_opts = git2::PushOptions::default();
        push_opts.remote_callbacks(callbacks);

        let mut remote = self.repo.find_remote(FORK_REMOTE)?;

        // + indicates "force" push
        let ref_spec = format!("+refs/heads/{branch}:refs/heads/{branch}");
        remote.push(&[ref_spec], Some(&mut push_opts))?;

        Ok(())
    }

    fn diff_against_parent(&self) -> Result<String> {
        let head = self.repo.head()?.peel_to_commit()?;
        let parent = head.parent(0)?;

        let diff = self.repo.diff_tree_to_tree(
            Some(&parent.tree()?),
            Some(&head.tree()?),
            None,
        )?;

        let mut patch = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                patch.push(line.origin());
            }
            patch.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        Ok(patch)
    }
}

/// Fork work tree that is cloned on the first git operation.
pub struct ForkClone {
    url: String,
    branch: String,
    credentials: Credentials,
    repo: Option<Repository>,
}

impl ForkClone {
    pub fn new(url: &str, branch: &str, credentials: &Credentials) -> Self {
        Self {
            url: url.to_string(),
            branch: branch.to_string(),
            credentials: credentials.clone(),
            repo: None,
        }
    }

    pub fn is_cloned(&self) -> bool {
        self.repo.is_some()
    }

    fn repository(&mut self) -> Result<&mut Repository> {
        if self.repo.is_none() {
            let repo = Repository::clone_fork(
                &self.url,
                &self.branch,
                &self.credentials,
            )?;
            self.repo = Some(repo);
        }

        self.repo.as_mut().ok_or_else(|| {
            ReleaseBotError::forge(format!("Failed to clone {}", self.url))
        })
    }
}

impl VersionControl for ForkClone {
    fn checkout_or_create_branch(&mut self, name: &str) -> Result<()> {
        self.repository()?.checkout_or_create_branch(name)
    }

    fn write_file_and_commit(
        &mut self,
        path: &str,
        content: &str,
        message: &str,
        author: &Author,
    ) -> Result<bool> {
        self.repository()?
            .write_file_and_commit(path, content, message, author)
    }

    fn push(&mut self, branch: &str, credentials: &Credentials) -> Result<()> {
        self.repository()?.push(branch, credentials)
    }

    fn diff_against_parent(&self) -> Result<String> {
        match &self.repo {
            Some(repo) => repo.diff_against_parent(),
            None => Ok(String::new()),
        }
    }
}

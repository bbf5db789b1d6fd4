//! Common functionality shared between commands
use log::*;
use secrecy::SecretString;
use std::rc::Rc;

use crate::{
    Result,
    cli::{Args, ThanksArgs},
    config::{Author, ReleaseConfig},
    forge::{
        config::RemoteConfig, github::Github, manager::ForgeManager,
        traits::Forge,
    },
    version::ReleaseVersion,
};

/// Everything a command needs to talk to the upstream.
pub struct Setup {
    pub config: Rc<ReleaseConfig>,
    pub forge: Rc<ForgeManager>,
    pub remote_config: RemoteConfig,
}

/// Fork owner and commit email: taken from the arguments when given,
/// otherwise looked up for the token's account.
pub async fn resolve_identity(
    args: &Args,
    token: &SecretString,
) -> Result<(String, String)> {
    if !args.user.is_empty() && !args.email.is_empty() {
        return Ok((args.user.clone(), args.email.clone()));
    }

    let lookup = Github::new(RemoteConfig {
        owner: args.org.clone(),
        repo: args.repo.clone(),
        token: token.clone(),
        ..RemoteConfig::default()
    })?;

    let user = if args.user.is_empty() {
        let login = lookup.current_login().await?;
        info!("using token account as fork user: {login}");
        login
    } else {
        args.user.clone()
    };

    let email = if args.email.is_empty() {
        lookup.primary_email().await?
    } else {
        args.email.clone()
    };

    Ok((user, email))
}

/// Validates the version, resolves the identity and builds the shared
/// config and forge manager. Nothing is changed remotely.
pub async fn setup(
    args: &Args,
    version: &str,
    thanks: &ThanksArgs,
) -> Result<Setup> {
    let version = ReleaseVersion::parse(version)?;
    let token = args.token()?;

    let (fork_owner, email) = resolve_identity(args, &token).await?;
    let upstream_owner = args.upstream_owner(&fork_owner);

    let config = ReleaseConfig::builder()
        .version(version)
        .upstream_owner(upstream_owner.clone())
        .repo(args.repo.clone())
        .fork_owner(fork_owner.clone())
        .token(token.clone())
        .author(Author {
            name: fork_owner,
            email,
        })
        .org(args.org.clone())
        .trunk_branch(args.trunk_branch.clone())
        .version_file(args.version_file.clone())
        .thanks(thanks.config())
        .build()?;

    let remote_config = RemoteConfig {
        owner: upstream_owner,
        repo: args.repo.clone(),
        token,
        ..RemoteConfig::default()
    };

    debug!("upstream: {}", config.upstream_path());

    let github = Github::new(remote_config.clone())?;
    let forge = ForgeManager::new(Box::new(github));

    Ok(Setup {
        config: Rc::new(config),
        forge: Rc::new(forge),
        remote_config,
    })
}

//! Immutable run configuration shared by the orchestrator, the forge manager
//! and the version-bump workflow.
use comfy_table::{ContentArrangement, Table};
use derive_builder::Builder;
use secrecy::SecretString;
use std::collections::HashSet;

use crate::{ReleaseBotError, Result, version::ReleaseVersion};

/// Default trunk branch all release branching starts from.
pub const DEFAULT_TRUNK_BRANCH: &str = "master";
/// Default path of the version file, relative to the repository root.
pub const DEFAULT_VERSION_FILE: &str = "version.go";
/// Default template the version file is rendered from.
pub const DEFAULT_VERSION_TEMPLATE: &str = r#"/*
 *
 * Copyright 2018 gRPC authors.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

package grpc

// Version is the current grpc version.
const Version = "{{ version }}"
"#;

/// Identity used for version-bump commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// Who gets a "special thanks" line in the release notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThanksConfig {
    pub enabled: bool,
    /// Authors never thanked.
    pub exclude: HashSet<String>,
    /// Authors always thanked, even organization members.
    pub include: HashSet<String>,
}

impl ThanksConfig {
    /// Builds the config from comma separated login lists.
    pub fn from_lists(enabled: bool, exclude: &str, include: &str) -> Self {
        Self {
            enabled,
            exclude: parse_login_list(exclude),
            include: parse_login_list(include),
        }
    }
}

/// Splits `a,b, c` into a set of logins, ignoring blank entries.
pub fn parse_login_list(list: &str) -> HashSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct ReleaseConfigParams {
    pub version: ReleaseVersion,
    pub upstream_owner: String,
    pub repo: String,
    pub fork_owner: String,
    pub token: SecretString,
    pub author: Author,
    pub org: String,
    #[builder(default = "DEFAULT_TRUNK_BRANCH.to_string()")]
    pub trunk_branch: String,
    #[builder(default = "DEFAULT_VERSION_FILE.to_string()")]
    pub version_file: String,
    #[builder(default = "DEFAULT_VERSION_TEMPLATE.to_string()")]
    pub version_template: String,
    #[builder(default)]
    pub thanks: ThanksConfig,
}

impl ReleaseConfigParamsBuilder {
    pub fn build(&self) -> Result<ReleaseConfig> {
        let params = self._build().map_err(|e| {
            ReleaseBotError::invalid_config(format!(
                "Failed to build release config: {}",
                e
            ))
        })?;
        ReleaseConfig::new(params)
    }
}

#[derive(Debug)]
pub struct ReleaseConfig {
    pub version: ReleaseVersion,
    pub upstream_owner: String,
    pub repo: String,
    pub fork_owner: String,
    pub token: SecretString,
    pub author: Author,
    pub org: String,
    pub trunk_branch: String,
    pub version_file: String,
    pub version_template: String,
    pub thanks: ThanksConfig,
}

impl ReleaseConfig {
    pub fn builder() -> ReleaseConfigParamsBuilder {
        ReleaseConfigParamsBuilder::default()
    }

    pub fn new(params: ReleaseConfigParams) -> Result<Self> {
        let required = [
            ("upstream owner", &params.upstream_owner),
            ("repo", &params.repo),
            ("fork owner", &params.fork_owner),
            ("trunk branch", &params.trunk_branch),
            ("version file", &params.version_file),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ReleaseBotError::invalid_config(format!(
                    "{name} must not be empty"
                )));
            }
        }

        if params.author.email.trim().is_empty() {
            return Err(ReleaseBotError::invalid_config(
                "commit author email must not be empty",
            ));
        }

        Ok(Self {
            version: params.version,
            upstream_owner: params.upstream_owner,
            repo: params.repo,
            fork_owner: params.fork_owner,
            token: params.token,
            author: params.author,
            org: params.org,
            trunk_branch: params.trunk_branch,
            version_file: params.version_file,
            version_template: params.version_template,
            thanks: params.thanks,
        })
    }

    /// `owner/repo` of the upstream the release is made in.
    pub fn upstream_path(&self) -> String {
        format!("{}/{}", self.upstream_owner, self.repo)
    }

    /// Table of the inputs the operator confirms before anything changes.
    pub fn summary_table(&self) -> Table {
        let version = self.version.to_string();
        let upstream = self.upstream_path();

        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["input", "value"])
            .add_row(vec!["user", self.fork_owner.as_str()])
            .add_row(vec!["email", self.author.email.as_str()])
            .add_row(vec!["repo", self.repo.as_str()])
            .add_row(vec!["version", version.as_str()])
            .add_row(vec!["upstreamRepo", upstream.as_str()]);
        table
    }
}

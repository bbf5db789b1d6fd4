//! Special thanks eligibility.
use std::collections::HashSet;

use crate::config::ThanksConfig;

/// Decides whether an author earns a "special thanks" line: anyone on the
/// include list, otherwise anyone who is neither an organization member nor
/// on the exclude list.
#[derive(Debug, Clone, Default)]
pub struct ThanksFilter {
    members: HashSet<String>,
    exclude: HashSet<String>,
    include: HashSet<String>,
}

impl ThanksFilter {
    pub fn new(members: HashSet<String>, config: &ThanksConfig) -> Self {
        Self {
            members,
            exclude: config.exclude.clone(),
            include: config.include.clone(),
        }
    }

    pub fn is_thanked(&self, login: &str) -> bool {
        if self.include.contains(login) {
            return true;
        }
        !self.members.contains(login) && !self.exclude.contains(login)
    }
}

use serde::Serialize;

use crate::forge::types::{Author, Milestone};

/// All note entries for a given release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseNoteDocument {
    pub org: String,
    pub repo: String,
    pub version: String,
    pub sections: Vec<Section>,
}

/// One release note section, for example "New Features".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub label_name: String,
    pub entries: Vec<Entry>,
}

/// One line of the release notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub issue_number: u64,
    pub title: String,
    pub html_url: String,
    pub user: Author,
    pub milestone: Option<Milestone>,
    pub special_thanks: bool,
}

impl ReleaseNoteDocument {
    /// Renders sections and entries in document order.
    ///
    /// ```text
    /// # New Features
    ///
    /// * xds: add ring hash (#4123)
    ///   - Special Thanks: @octocat
    /// ```
    pub fn to_markdown(&self) -> String {
        self.sections
            .iter()
            .map(Section::to_markdown)
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}

impl Section {
    fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.name);
        for entry in self.entries.iter() {
            out.push_str(&format!("* {} (#{})\n", entry.title, entry.issue_number));
            if entry.special_thanks {
                out.push_str(&format!(
                    "  - Special Thanks: @{}\n",
                    entry.user.login
                ));
            }
        }
        out
    }
}

//! Release note generation.
//!
//! Merged pull requests are bucketed by their most important `Type: ` label
//! into sections, titled from an explicit `RELEASE NOTES:` line when the
//! author wrote one, and the sections are ordered by label weight.

use log::*;

use crate::forge::types::MergeRecord;

pub mod labels;
pub mod marker;
pub mod thanks;
pub mod types;

use labels::{pick_category, section_name, sort_weight};
use marker::release_note_title;
use types::{Entry, ReleaseNoteDocument, Section};

/// Predicate over a merged pull request.
pub type RecordPredicate<'a> = Box<dyn Fn(&MergeRecord) -> bool + 'a>;

/// Optional filters applied while generating notes.
#[derive(Default)]
pub struct Filters<'a> {
    /// Records for which this returns true are left out entirely.
    pub ignore: Option<RecordPredicate<'a>>,
    /// Records for which this returns true get a special thanks line.
    pub special_thanks: Option<RecordPredicate<'a>>,
}

impl<'a> Filters<'a> {
    pub fn with_ignore(
        mut self,
        ignore: impl Fn(&MergeRecord) -> bool + 'a,
    ) -> Self {
        self.ignore = Some(Box::new(ignore));
        self
    }

    pub fn with_special_thanks(
        mut self,
        special_thanks: impl Fn(&MergeRecord) -> bool + 'a,
    ) -> Self {
        self.special_thanks = Some(Box::new(special_thanks));
        self
    }

    fn is_ignored(&self, record: &MergeRecord) -> bool {
        self.ignore.as_ref().is_some_and(|ignore| ignore(record))
    }

    fn is_thanked(&self, record: &MergeRecord) -> bool {
        self.special_thanks
            .as_ref()
            .is_some_and(|thanks| thanks(record))
    }
}

/// Builds the release note document for `version` from merged pull
/// requests. Output depends only on the input order and the filters.
pub fn generate_notes(
    org: &str,
    repo: &str,
    version: &str,
    records: &[MergeRecord],
    filters: &Filters,
) -> ReleaseNoteDocument {
    let mut sections: Vec<Section> = vec![];

    for record in records.iter() {
        if filters.is_ignored(record) {
            debug!("#{} ignored by filter", record.number);
            continue;
        }

        let category = pick_category(&record.labels);

        let Some(name) = section_name(&category) else {
            debug!(
                "#{} category {category:?} has no section: skipping",
                record.number
            );
            continue;
        };

        let Some(title) = release_note_title(&record.body, &record.title)
        else {
            debug!("#{} opted out of release notes", record.number);
            continue;
        };

        info!(
            "[{}] - {:<18} from: {:?}",
            record.number,
            format!("{category:?}"),
            record.labels
        );

        let entry = Entry {
            issue_number: record.number,
            title,
            html_url: record.html_url.clone(),
            user: record.author.clone(),
            milestone: record.milestone.clone(),
            special_thanks: filters.is_thanked(record),
        };

        match sections.iter_mut().find(|s| s.label_name == category) {
            Some(section) => section.entries.push(entry),
            None => sections.push(Section {
                name: name.to_string(),
                label_name: category,
                entries: vec![entry],
            }),
        }
    }

    sections.retain(|s| !s.entries.is_empty());
    // sort_by_key is stable: equal weights keep first-seen order
    sections.sort_by_key(|s| std::cmp::Reverse(sort_weight(&s.label_name)));

    ReleaseNoteDocument {
        org: org.to_string(),
        repo: repo.to_string(),
        version: version.to_string(),
        sections,
    }
}

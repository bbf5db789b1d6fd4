//! `RELEASE NOTES:` marker parsing for pull request bodies.
use regex::Regex;
use std::sync::LazyLock;

static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*RELEASE NOTES:(?<text>[^\r\n]*)").unwrap()
});

/// What a pull request body says about its release note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteMarker {
    /// No usable marker: use the pull request title.
    Absent,
    /// The author asked for no release note (`none` or `n/a`).
    Excluded,
    /// Explicit release note text.
    Text(String),
}

/// Reads the first line of `body` that starts with `RELEASE NOTES:`. When
/// nothing follows the marker on that line, the next non-blank line is
/// used instead. The marker itself is case-sensitive; `none` and `n/a` are
/// matched in any case. A single leading `- ` or `* ` bullet is removed
/// from the text.
pub fn parse_marker(body: &str) -> NoteMarker {
    let Some(caps) = MARKER_REGEX.captures(body) else {
        return NoteMarker::Absent;
    };

    let Some(text) = caps.name("text") else {
        return NoteMarker::Absent;
    };

    let mut note = text.as_str().trim();
    if note.is_empty() {
        note = body[text.end()..]
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();

        if MARKER_REGEX.is_match(note) {
            return NoteMarker::Absent;
        }
    }

    if note.eq_ignore_ascii_case("none") || note.eq_ignore_ascii_case("n/a") {
        return NoteMarker::Excluded;
    }

    let note = note
        .strip_prefix("- ")
        .or_else(|| note.strip_prefix("* "))
        .unwrap_or(note)
        .trim();

    if note.is_empty() {
        return NoteMarker::Absent;
    }

    NoteMarker::Text(note.to_string())
}

/// Entry title for a pull request: the marker text when given, otherwise
/// `title`. `None` when the author opted out of release notes.
pub fn release_note_title(body: &str, title: &str) -> Option<String> {
    match parse_marker(body) {
        NoteMarker::Excluded => None,
        NoteMarker::Text(text) => Some(text),
        NoteMarker::Absent => Some(title.to_string()),
    }
}

//! Changeset marker extraction.
//!
//! SQL scripts carry their migration metadata in marker lines of the form
//! `--changeset <author>:<id> <options>`. The marker token is matched
//! case-insensitively; every other line of a script is inert.

use crate::changelog::Changeset;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Marker token introducing a changeset header line.
pub const MARKER: &str = "--changeset";

/// Header shape: marker, author up to the first colon, id up to the next
/// space, remainder as options. Lazy groups keep author and id minimal,
/// options capture the rest of the line verbatim.
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^--changeset (.*?):(.*?) (.*)$").expect("changeset header pattern is valid")
});

/// Parses a single script line into a [`Changeset`] if it is a marker line.
///
/// Leading whitespace is ignored. Lines that do not start with the marker
/// token return `None`; this is the common case, not an error. A line that
/// starts with the marker but does not fit the `author:id options` shape is
/// skipped with a warning instead of producing a partial record.
#[must_use]
pub fn try_parse(line: &str) -> Option<Changeset> {
    let line = line.trim_start();
    if !line.to_lowercase().starts_with(MARKER) {
        return None;
    }

    match HEADER_RE.captures(line) {
        Some(caps) => Some(Changeset {
            author: caps[1].to_string(),
            id: caps[2].to_string(),
            options: caps[3].to_string(),
            content: None,
        }),
        None => {
            warn!(line = %line, "skipping changeset header without author:id fields");
            None
        }
    }
}

/// Scans script lines in order, collecting every changeset header found.
///
/// Records appear in encounter order. Non-matching lines contribute
/// nothing; content lines between headers are discarded. Empty input
/// yields empty output.
pub fn scan<I, S>(lines: I) -> Vec<Changeset>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| try_parse(line.as_ref()))
        .collect()
}

//! Indented rendering of resolved changelog trees.

use crate::changelog::Changelog;

/// Indentation added per nesting level.
pub const INDENT_STEP: usize = 5;

/// Indentation of the outermost level.
const BASE_INDENT: usize = 1;

/// Renders a resolved changelog tree as indented lines.
///
/// Per include, in document order: one line per attached changeset (its
/// display form), then the raw reference string indented by the current
/// depth in spaces, then the nested changelog one `step` deeper. An empty
/// changelog renders nothing. Pure formatting; the tree is not touched.
#[must_use]
pub fn render(log: &Changelog, step: usize) -> Vec<String> {
    let mut lines = Vec::new();
    render_into(log, BASE_INDENT, step, &mut lines);
    lines
}

fn render_into(log: &Changelog, indent: usize, step: usize, lines: &mut Vec<String>) {
    for include in &log.includes {
        for changeset in &include.changesets {
            lines.push(changeset.to_string());
        }
        lines.push(format!("{:indent$}{}", "", include.file));
        if let Some(nested) = &include.nested {
            render_into(nested, indent + step, step, lines);
        }
    }
}

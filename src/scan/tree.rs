//! Directory tree rendering for the corpus header.
//!
//! The listing is flat and two-pass: first every ancestor directory of an
//! included file, ordered by `(depth, path)`, then every file ordered by
//! `(parent, name)`. Each line is indented two spaces per path segment.

use crate::domain::FileRef;
use crate::utils::paths::components;
use std::collections::BTreeSet;

const INDENT: &str = "  ";

/// Render the tree for `files` under a root called `root_name`.
///
/// The result has no trailing newline.
pub fn render_tree(root_name: &str, files: &[FileRef]) -> String {
    let mut lines = vec![format!("{}/", root_name)];

    let mut dirs: BTreeSet<(usize, String)> = BTreeSet::new();
    for file in files {
        let parts = components(file.parent());
        for end in 1..=parts.len() {
            dirs.insert((end, parts[..end].join("/")));
        }
    }

    for (depth, dir) in &dirs {
        let name = dir.rsplit('/').next().unwrap_or(dir);
        lines.push(format!("{}{}/", INDENT.repeat(*depth), name));
    }

    let mut sorted: Vec<&FileRef> = files.iter().collect();
    sorted.sort_by(|a, b| {
        components(a.parent())
            .cmp(&components(b.parent()))
            .then_with(|| a.file_name().cmp(b.file_name()))
    });

    for file in sorted {
        lines.push(format!("{}{}", INDENT.repeat(file.depth() + 1), file.file_name()));
    }

    lines.join("\n")
}

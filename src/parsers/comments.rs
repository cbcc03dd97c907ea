//! Comment and case normalization applied before parsing.

use itertools::Itertools;

/// Lowercases PDDL text and blanks out `;` comments.
///
/// Line breaks are kept so that positions reported for the result still
/// match the original text. A `;` inside `[...]` separates plan step
/// annotations and does not start a comment.
pub fn preprocess(text: &str) -> String {
    text.lines()
        .map(strip_comment)
        .map(str::to_lowercase)
        .join("\n")
}

fn strip_comment(line: &str) -> &str {
    let mut in_annotation = false;
    for (i, c) in line.char_indices() {
        match c {
            '[' => in_annotation = true,
            ']' => in_annotation = false,
            ';' if !in_annotation => return &line[..i],
            _ => {}
        }
    }
    line
}

//! Console output: issue list, rewrite diffs and the declaration listing.

use crate::model::{Declaration, Issue, LineChange};
use colored::Colorize;
use std::fmt::Write;
use std::path::Path;

/// Issue list under a banner, or the success line when there are none.
pub fn format_issues<'a, I>(issues: I) -> String
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut issues = issues.into_iter().peekable();
    if issues.peek().is_none() {
        return format!(
            "\n{}\n",
            "No issues found. All files comply with docstring standards!".green()
        );
    }

    let mut out = String::from("\nIssues found:\n---------------\n");
    for issue in issues {
        let _ = writeln!(out, "{issue}");
    }
    out
}

/// Per-line diff of a header rewrite.
pub fn format_changes(path: &Path, changes: &[LineChange], written: bool) -> String {
    let title = if written {
        format!("Modified {}:", path.display()).green()
    } else {
        format!("Would modify {}:", path.display()).yellow()
    };
    let mut out = format!("{title}\n");
    for change in changes {
        let line = format!(
            "Line {}: {} -> {}",
            change.line,
            change.original.trim_end(),
            change.updated.trim_end()
        );
        let _ = writeln!(out, "{}", line.green());
    }
    out
}

/// `Line N: signature` with the line number in blue and every return and
/// parameter type in red.
pub fn format_declaration(decl: &Declaration) -> String {
    let mut types: Vec<&str> = Vec::with_capacity(decl.params.len() + 1);
    types.push(&decl.signature.return_type);
    types.extend(decl.params.iter().map(|p| p.ty.as_str()));
    format!(
        "{}: {}",
        format!("Line {}", decl.start_line).blue(),
        highlight(&decl.signature.text, &types)
    )
}

/// Color every occurrence of each needle in `text` red.
///
/// Matches are marked on the plain text first so a later needle can never
/// land inside an escape sequence added for an earlier one.
fn highlight(text: &str, needles: &[&str]) -> String {
    let mut marked = vec![false; text.len()];
    for needle in needles.iter().filter(|n| !n.is_empty()) {
        for (start, m) in text.match_indices(needle) {
            marked[start..start + m.len()].iter_mut().for_each(|b| *b = true);
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut start = 0;
    while start < text.len() {
        let red = marked[start];
        let mut end = start;
        while end < text.len() && marked[end] == red {
            end += 1;
        }
        let segment = &text[start..end];
        if red {
            let _ = write!(out, "{}", segment.red());
        } else {
            out.push_str(segment);
        }
        start = end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::extract_methods;

    #[test]
    fn success_banner_when_clean() {
        let out = format_issues(&Vec::<Issue>::new());
        assert!(out.contains("No issues found"));
        assert!(!out.contains("Issues found:"));
    }

    #[test]
    fn issues_listed_in_order() {
        let issues = vec![
            Issue::new(Path::new("a.cpp"), 1, "No header comment found"),
            Issue::new(Path::new("b.hpp"), 3, "Missing @author in header"),
        ];
        let out = format_issues(&issues);
        let first = out.find("a.cpp:1: No header comment found").unwrap();
        let second = out.find("b.hpp:3: Missing @author in header").unwrap();
        assert!(out.contains("Issues found:"));
        assert!(first < second);
    }

    #[test]
    fn changes_show_original_and_updated() {
        let changes = vec![LineChange {
            line: 2,
            original: " * File: a.cpp".into(),
            updated: " * @file a.cpp".into(),
        }];
        let out = format_changes(Path::new("a.cpp"), &changes, true);
        assert!(out.contains("Modified a.cpp:"));
        assert!(out.contains("Line 2:  * File: a.cpp ->  * @file a.cpp"));
        let out = format_changes(Path::new("a.cpp"), &changes, false);
        assert!(out.contains("Would modify a.cpp:"));
    }

    #[test]
    fn changes_keep_indentation() {
        let changes = vec![LineChange {
            line: 3,
            original: "\tAuthor: Jane  ".into(),
            updated: "\t@author Jane  ".into(),
        }];
        let out = format_changes(Path::new("a.cpp"), &changes, false);
        assert!(out.contains("Line 3: \tAuthor: Jane -> \t@author Jane"), "{out:?}");
        assert!(!out.contains("Jane  "), "{out:?}");
    }

    #[test]
    fn declaration_listing_keeps_text() {
        let methods = extract_methods(&["", "int compute(int x, double y);"]);
        let out = format_declaration(&methods[0].declaration);
        assert!(out.contains("Line 2"));
        assert!(out.contains("compute("));
    }

    #[test]
    fn highlight_segments_cover_text() {
        colored::control::set_override(false);
        assert_eq!(highlight("int f(int a)", &["int"]), "int f(int a)");
        colored::control::unset_override();
    }
}

//! File header normalization.
//!
//! Rewrites legacy `File:`/`Author:`/`Date:` spellings in the first
//! docstring block into `@file`/`@author`/`@date` tags and reports the tags
//! that are still missing. Nothing here touches the filesystem: the result
//! is a [`HeaderReport`] whose changes the caller applies.

use crate::model::{split_lines, HeaderReport, Issue, LineChange};
use crate::parser::blocks;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

// -- Legacy tag patterns (applied in this order) ------------------------------

static RE_LEGACY_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<pre>^|[^@\w-])(?i:file):(?P<ws>\s*)(?P<name>\S*)").unwrap()
});

static RE_TAG_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<tag>@file|@date|@author)\s*:(?P<ws>\s*)").unwrap());

static RE_LEGACY_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<pre>^|[^@\w-])(?i:author):(?P<ws>\s*)(?P<first>\w)").unwrap()
});

static RE_LEGACY_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<pre>^|[^@\w])(?i:creation date|date|created on):\s*(?P<rest>\S.*)").unwrap()
});

// -- Required tags ------------------------------------------------------------

static RE_FILE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@file\s+(?P<name>\S+)").unwrap());

static RE_AUTHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@author\s+\w").unwrap());

/// Whitespace captured after a tag, or a single space when there was none.
fn separator(ws: &str) -> &str {
    if ws.is_empty() {
        " "
    } else {
        ws
    }
}

/// Name token with a glued block terminator removed.
fn token_name(token: &str) -> &str {
    token.strip_suffix("*/").unwrap_or(token)
}

/// Run the four rewrites over one header line.
///
/// Returns the rewritten text and, when a `File:` tag names some other file,
/// that name.
fn rewrite_line(text: &str, file_name: &str) -> (String, Option<String>) {
    let mut line = text.to_string();
    let mut wrong_name = None;

    // 1. File: <name> -> @file <name>, only for the exact basename
    line = RE_LEGACY_FILE
        .replace_all(&line, |caps: &Captures| {
            if token_name(&caps["name"]) == file_name {
                format!("{}@file{}{}", &caps["pre"], separator(&caps["ws"]), &caps["name"])
            } else {
                wrong_name.get_or_insert_with(|| caps["name"].to_string());
                caps[0].to_string()
            }
        })
        .into_owned();

    // 2. @file: / @date: / @author: -> drop the colon
    let len = line.len();
    line = RE_TAG_COLON
        .replace_all(&line, |caps: &Captures| {
            let trailing = caps.get(0).is_some_and(|m| m.end() == len);
            let ws = &caps["ws"];
            let ws = if trailing { ws } else { separator(ws) };
            format!("{}{}", &caps["tag"], ws)
        })
        .into_owned();

    // 3. Author: <name> -> @author <name>
    line = RE_LEGACY_AUTHOR
        .replace_all(&line, |caps: &Captures| {
            format!("{}@author{}{}", &caps["pre"], separator(&caps["ws"]), &caps["first"])
        })
        .into_owned();

    // 4. Creation date: / Date: / Created on: -> @date <rest>
    if !line.contains("@date") {
        line = RE_LEGACY_DATE
            .replace(&line, |caps: &Captures| format!("{}@date {}", &caps["pre"], &caps["rest"]))
            .into_owned();
    }

    (line, wrong_name)
}

/// Check and normalize the header block of `content`.
///
/// `path` supplies the expected `@file` name and the issue location.
pub fn normalize_header(path: &Path, content: &str) -> HeaderReport {
    let mut report = HeaderReport::default();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let source = split_lines(content);
    let texts: Vec<&str> = source.iter().map(|l| l.text).collect();
    let Some(block) = blocks::find_first_block(&texts) else {
        report
            .issues
            .push(Issue::new(path, 1, "No header comment found"));
        return report;
    };

    let mut normalized = Vec::with_capacity(block.end_line - block.start_line + 1);
    for line_no in block.start_line..=block.end_line {
        let original = texts[line_no - 1];
        let (updated, wrong_name) = rewrite_line(original, &file_name);
        if let Some(found) = wrong_name {
            log::debug!("{}:{}: File: tag names {}", path.display(), line_no, found);
            report.issues.push(Issue::new(
                path,
                line_no,
                format!("Incorrect file name in '@file' (expected '@file {file_name}')"),
            ));
        }
        if updated != original {
            report.changes.push(LineChange {
                line: line_no,
                original: original.to_string(),
                updated: updated.clone(),
            });
        }
        normalized.push(updated);
    }

    let header_text = normalized.join(" ");
    report.has_file_tag = RE_FILE_TAG
        .captures_iter(&header_text)
        .any(|caps| token_name(&caps["name"]).eq_ignore_ascii_case(&file_name));
    report.has_author_tag = RE_AUTHOR_TAG.is_match(&header_text);

    if !report.has_file_tag {
        report.issues.push(Issue::new(
            path,
            block.start_line,
            format!("Missing or incorrect @file in header (expected '@file {file_name}')"),
        ));
    }
    if !report.has_author_tag {
        report.issues.push(Issue::new(
            path,
            block.start_line,
            "Missing @author in header (expected '@author <name>')",
        ));
    }

    report.block = Some(block);
    report
}

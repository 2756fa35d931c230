//! Include guard check for header files.

use crate::model::Issue;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static RE_PRAGMA_ONCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*pragma\s+once\s*(?://.*)?$").unwrap());

static RE_IFNDEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*ifndef\s+(?P<name>\w+)").unwrap());

static RE_DEFINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*define\s+(?P<name>\w+)\s*$").unwrap());

/// True when the first two preprocessor lines are `#ifndef X` / `#define X`.
fn has_classic_guard(lines: &[&str]) -> bool {
    let mut directives = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| l.starts_with('#'));
    match (directives.next(), directives.next()) {
        (Some(first), Some(second)) => {
            match (RE_IFNDEF.captures(first), RE_DEFINE.captures(second)) {
                (Some(a), Some(b)) => a["name"] == b["name"],
                _ => false,
            }
        }
        _ => false,
    }
}

/// Report a missing include guard. Headers only; the caller filters by
/// file kind.
pub fn has_required_guard(path: &Path, lines: &[&str]) -> Vec<Issue> {
    if lines.iter().any(|l| RE_PRAGMA_ONCE.is_match(l.trim())) || has_classic_guard(lines) {
        return Vec::new();
    }
    vec![Issue::new(
        path,
        1,
        "Missing include guard (expected '#pragma once' directive)",
    )]
}

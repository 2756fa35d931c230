//! Data model shared by the parsing and checking passes.

use std::fmt;
use std::path::{Path, PathBuf};

/// One physical line of a source file.
///
/// `text` excludes the terminator; `ending` keeps it (`"\n"`, `"\r\n"` or
/// `""` on an unterminated last line) so a rewrite can reassemble the file
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number
    pub index: usize,
    pub text: &'a str,
    pub ending: &'a str,
}

/// Split file content into lines, preserving each line terminator.
pub fn split_lines(content: &str) -> Vec<SourceLine<'_>> {
    content
        .split_inclusive('\n')
        .enumerate()
        .map(|(i, raw)| {
            let (text, ending) = if let Some(t) = raw.strip_suffix("\r\n") {
                (t, "\r\n")
            } else if let Some(t) = raw.strip_suffix('\n') {
                (t, "\n")
            } else {
                (raw, "")
            };
            SourceLine {
                index: i + 1,
                text,
                ending,
            }
        })
        .collect()
}

/// What kind of callable a matched signature names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Constructor,
    Destructor,
}

/// Best-effort view of a declaration line, produced by the signature matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Empty for constructors, destructors and declarations with no type
    /// before the name.
    pub return_type: String,
    /// Name token as written, including any `Class::` scope.
    pub name: String,
    pub kind: MethodKind,
    /// Reconstructed `ret name(params) qualifiers` text.
    pub text: String,
}

impl Signature {
    /// Name with scope and pointer/reference markers removed.
    pub fn bare_name(&self) -> &str {
        bare_name(&self.name)
    }
}

/// Strip any `Class::` scope and leading `*`/`&` from a name token.
pub fn bare_name(name: &str) -> &str {
    let last = name.rsplit("::").next().unwrap_or(name);
    last.trim_start_matches(['*', '&'])
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

impl Param {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// A candidate method declaration located in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub signature: Signature,
    pub params: Vec<Param>,
    pub start_line: usize,
    pub end_line: usize,
}

/// A `/** ... */` comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    pub start_line: usize,
    pub end_line: usize,
    /// Trimmed line contents, open and close markers included
    pub lines: Vec<String>,
}

impl DocBlock {
    /// All lines joined with single spaces, for tag searches.
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }
}

/// A declaration paired with the docstring right before it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    pub declaration: Declaration,
    pub docstring: Option<DocBlock>,
}

/// A reported non-compliance finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: PathBuf,
    pub line: usize,
    pub message: String,
}

impl Issue {
    pub fn new(path: &Path, line: usize, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.message)
    }
}

/// One header line rewritten by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    /// 1-based line number
    pub line: usize,
    pub original: String,
    pub updated: String,
}

/// Outcome of header normalization for one file.
#[derive(Debug, Default)]
pub struct HeaderReport {
    pub block: Option<DocBlock>,
    pub has_file_tag: bool,
    pub has_author_tag: bool,
    pub changes: Vec<LineChange>,
    pub issues: Vec<Issue>,
}

impl HeaderReport {
    pub fn is_modified(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Rebuild `content` with every recorded change applied.
    ///
    /// Untouched lines and all line terminators are copied through as-is.
    pub fn apply(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        for line in split_lines(content) {
            match self.changes.iter().find(|c| c.line == line.index) {
                Some(change) => out.push_str(&change.updated),
                None => out.push_str(line.text),
            }
            out.push_str(line.ending);
        }
        out
    }
}

//! Docstring block scanner: a line-by-line state machine.
//!
//! Pairs each declaration with the `/** ... */` block right before it. A
//! line is in exactly one state: inside a docstring, inside a method being
//! skipped to its end, or scanning for the next declaration.

use crate::model::{Declaration, DocBlock, MethodRecord, Signature};
use crate::parser::{params, signature};

const OPEN_MARKER: &str = "/**";
const CLOSE_MARKER: &str = "*/";

/// How many extra lines a parameter list may span before the candidate is
/// abandoned.
const MAX_CONTINUATION_LINES: usize = 8;

pub fn is_docstring_start(line: &str) -> bool {
    line.trim().starts_with(OPEN_MARKER)
}

pub fn is_docstring_end(line: &str) -> bool {
    line.trim().ends_with(CLOSE_MARKER)
}

/// Collect the block opening at `start` (0-based). `None` if it never
/// closes.
fn collect_block(lines: &[&str], start: usize) -> Option<DocBlock> {
    let mut block = DocBlock {
        start_line: start + 1,
        ..Default::default()
    };
    for (offset, line) in lines[start..].iter().enumerate() {
        block.lines.push(line.trim().to_string());
        if is_docstring_end(line) {
            block.end_line = start + offset + 1;
            return Some(block);
        }
    }
    None
}

/// The first docstring-shaped block in the file, wherever it sits.
pub fn find_first_block(lines: &[&str]) -> Option<DocBlock> {
    let start = lines.iter().position(|l| is_docstring_start(l))?;
    collect_block(lines, start)
}

/// Lines that may sit between a docstring and its declaration.
fn is_transparent(stripped: &str) -> bool {
    stripped.is_empty()
        || stripped.starts_with("//")
        || stripped.starts_with("/*")
        || stripped.starts_with("template")
        || stripped.starts_with("[[")
}

/// A declaration whose body (or terminator) has not been reached yet.
struct OpenMethod {
    signature: Signature,
    docstring: Option<DocBlock>,
    start_line: usize,
    depth: i32,
    braced: bool,
}

impl OpenMethod {
    /// Feed one trimmed line. Returns true once the method is complete.
    fn consume(&mut self, stripped: &str) -> bool {
        for ch in stripped.chars() {
            match ch {
                '{' => {
                    self.depth += 1;
                    self.braced = true;
                }
                '}' => self.depth -= 1,
                _ => {}
            }
        }
        if self.braced {
            self.depth <= 0
        } else {
            stripped.ends_with(';') || stripped.ends_with('}')
        }
    }

    fn finish(self, end_line: usize) -> MethodRecord {
        let params = params::extract_parameters(&self.signature.text);
        MethodRecord {
            declaration: Declaration {
                signature: self.signature,
                params,
                start_line: self.start_line,
                end_line,
            },
            docstring: self.docstring,
        }
    }
}

/// A declaration matched at some line, possibly joined from several.
struct Matched {
    signature: Signature,
    text: String,
    consumed: usize,
}

/// Try to match a declaration starting at `lines[i]`, joining continuation
/// lines while the parameter list is still open.
fn match_at(lines: &[&str], i: usize) -> Option<Matched> {
    let first = lines[i].trim();
    if let Some(signature) = signature::match_declaration(first) {
        return Some(Matched {
            signature,
            text: first.to_string(),
            consumed: 1,
        });
    }
    if !signature::opens_declaration(first) {
        return None;
    }

    let mut joined = first.to_string();
    for (j, next) in lines
        .iter()
        .enumerate()
        .skip(i + 1)
        .take(MAX_CONTINUATION_LINES)
    {
        joined.push(' ');
        joined.push_str(next.trim());
        if signature::paren_balance(&joined) <= 0 {
            return signature::match_declaration(&joined).map(|signature| Matched {
                signature,
                text: joined,
                consumed: j - i + 1,
            });
        }
    }
    None
}

/// Extract every declaration and its preceding docstring, in file order.
pub fn extract_methods(lines: &[&str]) -> Vec<MethodRecord> {
    let mut methods = Vec::new();
    let mut pending_doc: Option<DocBlock> = None;
    let mut open_doc: Option<DocBlock> = None;
    let mut open_method: Option<OpenMethod> = None;

    let mut i = 0;
    while i < lines.len() {
        let line_no = i + 1;
        let stripped = lines[i].trim();

        if let Some(mut doc) = open_doc.take() {
            doc.lines.push(stripped.to_string());
            if is_docstring_end(stripped) {
                doc.end_line = line_no;
                pending_doc = Some(doc);
            } else {
                open_doc = Some(doc);
            }
            i += 1;
            continue;
        }

        if let Some(mut method) = open_method.take() {
            if method.consume(stripped) {
                methods.push(method.finish(line_no));
            } else {
                open_method = Some(method);
            }
            i += 1;
            continue;
        }

        if is_docstring_start(stripped) {
            let doc = DocBlock {
                start_line: line_no,
                end_line: line_no,
                lines: vec![stripped.to_string()],
            };
            if is_docstring_end(stripped) {
                pending_doc = Some(doc);
            } else {
                open_doc = Some(doc);
            }
            i += 1;
            continue;
        }

        if let Some(matched) = match_at(lines, i) {
            let mut method = OpenMethod {
                signature: matched.signature,
                docstring: pending_doc.take(),
                start_line: line_no,
                depth: 0,
                braced: false,
            };
            i += matched.consumed;
            if method.consume(&matched.text) {
                methods.push(method.finish(i));
            } else {
                open_method = Some(method);
            }
            continue;
        }

        if !is_transparent(stripped) {
            pending_doc = None;
        }
        i += 1;
    }

    methods
}

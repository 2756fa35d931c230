//! Heuristic declaration matcher.
//!
//! Recognizes the common C++ method shapes on one logical line without a
//! grammar: `ret name(params) qualifiers`, `Class::Class(...)`,
//! `Class::~Class()`. Anything it cannot make sense of is reported as "not a
//! method" (`None`) so callers never see a half-parsed declaration.

use crate::model::{MethodKind, Signature};

/// Tokens that end the backward walk collecting a return type.
const RETURN_TYPE_STOPS: &[&str] = &[
    "inline",
    "const",
    "override",
    "final",
    "virtual",
    "static",
    "explicit",
    "constexpr",
    "extern",
    "friend",
];

/// Qualifiers kept in the reconstructed signature after the closing `)`.
const TRAILING_QUALIFIERS: &[&str] = &["const", "override", "final", "noexcept"];

/// Right-hand sides of `= ...` kept after the closing `)`.
const ASSIGNED_QUALIFIERS: &[&str] = &["default", "delete", "0"];

/// Keywords that look like calls but never name a method.
const NOT_CALLABLE: &[&str] = &[
    "if",
    "for",
    "while",
    "switch",
    "return",
    "catch",
    "sizeof",
    "alignof",
    "decltype",
    "static_assert",
    "throw",
    "new",
    "delete",
    "do",
    "else",
];

/// Match one logical line against the declaration heuristics.
pub fn match_declaration(line: &str) -> Option<Signature> {
    let stripped = line.trim();
    if stripped.is_empty() || is_comment_or_directive(stripped) {
        return None;
    }

    let words = tokenize(stripped);
    let open = words
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, w)| w.as_str() == "(")
        .map(|(i, _)| i)?;
    let name_idx = open - 1;
    let name = words[name_idx].as_str();
    if !is_callable_name(name) || has_expression_prefix(&words[..name_idx]) {
        return None;
    }

    let kind = classify(&words, name_idx);
    let return_type = match kind {
        MethodKind::Method => {
            let mut start = name_idx;
            while start > 0 && !RETURN_TYPE_STOPS.contains(&words[start - 1].as_str()) {
                start -= 1;
            }
            let mut ty = join_tokens(&words[start..name_idx]);
            // `Vital *find(` returns `Vital*`
            if !ty.is_empty() {
                let markers = &name[..name.len() - name.trim_start_matches(['*', '&']).len()];
                ty.push_str(markers);
            }
            ty
        }
        MethodKind::Constructor | MethodKind::Destructor => String::new(),
    };

    let close = matching_close(&words, open)?;

    // Keep trailing qualifiers, dropping any terminator glued onto them
    let mut kept: Vec<&str> = words[..=close].iter().map(String::as_str).collect();
    let mut end = close + 1;
    while end < words.len() {
        let word = strip_terminator(&words[end]);
        if TRAILING_QUALIFIERS.contains(&word) {
            kept.push(word);
            end += 1;
        } else if let Some(rhs) = word.strip_prefix('=').filter(|r| !r.is_empty()) {
            if !ASSIGNED_QUALIFIERS.contains(&rhs) {
                break;
            }
            kept.extend(["=", rhs]);
            end += 1;
        } else if word == "=" {
            match words.get(end + 1).map(|w| strip_terminator(w)) {
                Some(rhs) if ASSIGNED_QUALIFIERS.contains(&rhs) => {
                    kept.extend(["=", rhs]);
                    end += 2;
                }
                _ => break,
            }
        } else {
            break;
        }
    }

    let mut text = join_tokens(&kept);
    if stripped.ends_with(';') || stripped.ends_with('}') {
        text.push_str(&stripped[stripped.len() - 1..]);
    }
    if !text.contains('(') || !text.contains(')') {
        return None;
    }

    Some(Signature {
        return_type,
        name: name.to_string(),
        kind,
        text,
    })
}

/// True when `line` starts a declaration whose parameter list continues on
/// the following lines.
pub fn opens_declaration(line: &str) -> bool {
    let stripped = line.trim();
    if stripped.is_empty() || is_comment_or_directive(stripped) || paren_balance(stripped) <= 0 {
        return false;
    }
    let words = tokenize(stripped);
    words
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, w)| w.as_str() == "(")
        .is_some_and(|(i, _)| {
            is_callable_name(&words[i - 1]) && !has_expression_prefix(&words[..i - 1])
        })
}

/// Count of `(` minus count of `)`.
pub fn paren_balance(text: &str) -> i32 {
    text.chars().fold(0, |depth, ch| match ch {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}

/// Split on whitespace with `(`, `)` and `,` as standalone tokens.
fn tokenize(line: &str) -> Vec<String> {
    line.replace('(', " ( ")
        .replace(')', " ) ")
        .replace(',', " , ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Join tokens back into source-like text: no space before `(`, `)` or `,`
/// and none after `(`.
fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    let mut prev: Option<&str> = None;
    for tok in tokens {
        let tok = tok.as_ref();
        let glued = matches!(tok, "(" | ")" | ",") || prev == Some("(");
        if prev.is_some() && !glued {
            out.push(' ');
        }
        out.push_str(tok);
        prev = Some(tok);
    }
    out
}

fn is_comment_or_directive(stripped: &str) -> bool {
    stripped.starts_with("//")
        || stripped.starts_with("/*")
        || stripped.starts_with('*')
        || stripped.starts_with('#')
}

fn is_callable_name(name: &str) -> bool {
    let scoped = name.trim_start_matches(['*', '&']);
    let last = scoped.rsplit("::").next().unwrap_or(scoped);
    let ident = last.strip_prefix('~').unwrap_or(last);
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_') && !NOT_CALLABLE.contains(&ident)
}

/// Tokens before the name that mark an expression rather than a declaration
/// (`x = f(...)`, `return f(...)`).
fn has_expression_prefix(prefix: &[String]) -> bool {
    prefix
        .iter()
        .any(|w| w.contains('=') || NOT_CALLABLE.contains(&w.as_str()))
}

fn classify(words: &[String], name_idx: usize) -> MethodKind {
    let scoped = words[name_idx].trim_start_matches(['*', '&']);
    let segments: Vec<&str> = scoped.split("::").collect();
    let last = segments[segments.len() - 1];
    if last.starts_with('~') {
        return MethodKind::Destructor;
    }
    if segments.len() >= 2 && segments[segments.len() - 2] == last {
        return MethodKind::Constructor;
    }
    // `Class:: Class(` with the scope split off into its own token
    if name_idx > 0 {
        if let Some(scope) = words[name_idx - 1].strip_suffix("::") {
            if scope.rsplit("::").next() == Some(last) {
                return MethodKind::Constructor;
            }
        }
    }
    MethodKind::Method
}

fn matching_close(words: &[String], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, word) in words.iter().enumerate().skip(open) {
        match word.as_str() {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn strip_terminator(word: &str) -> &str {
    word.trim_end_matches([';', '{', '}'])
}

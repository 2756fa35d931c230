//! Parameter and return-type extraction from a reconstructed signature.

use crate::model::Param;
use regex::Regex;
use std::sync::LazyLock;

/// `type name` with the type ending in a word, `>` or `]` followed by
/// whitespace, or in `*`/`&` glued to the name. Trailing array brackets
/// after the name are captured separately.
static RE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<ty>.*?(?:[\w>\]]\s+|[*&]\s*))(?P<name>[A-Za-z_]\w*)\s*(?P<dims>(?:\[[^\]]*\]\s*)*)$")
        .unwrap()
});

static RE_RETURN_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:(?:inline|virtual|static|explicit|constexpr|extern|friend)\s+)*",
        r"(?:(?P<ret>[\w*&:]+(?:\s*<[^()]*>)?(?:\s*\[\])?)\s+)?",
        r"[~\w:]+\s*\(",
    ))
    .unwrap()
});

/// Text between the first `(` of `signature` and its matching `)`.
pub fn parameter_list(signature: &str) -> Option<&str> {
    let open = signature.find('(')?;
    let mut depth = 0usize;
    for (i, ch) in signature[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&signature[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a parameter list on commas that are not nested inside `<>`, `[]`
/// or `()`.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in list.char_indices() {
        match ch {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Parse one parameter fragment, dropping any default value.
fn parse_param(fragment: &str) -> Option<Param> {
    let decl = fragment
        .split_once('=')
        .map_or(fragment, |(lhs, _)| lhs)
        .trim();
    let caps = RE_PARAM.captures(decl)?;
    let mut ty = caps["ty"].trim().to_string();
    let dims: String = caps["dims"].split_whitespace().collect();
    ty.push_str(&dims);
    Some(Param::new(ty, &caps["name"]))
}

/// Ordered `(type, name)` pairs declared by `signature`.
///
/// Fragments that do not look like `type name` (`void`, `...`, unnamed
/// parameters) are skipped.
pub fn extract_parameters(signature: &str) -> Vec<Param> {
    let Some(list) = parameter_list(signature) else {
        return Vec::new();
    };
    split_top_level(list)
        .into_iter()
        .filter_map(parse_param)
        .collect()
}

/// True when the return type written before the name is exactly `void`.
pub fn returns_void(signature: &str) -> bool {
    RE_RETURN_TYPE
        .captures(signature.trim())
        .and_then(|caps| caps.name("ret"))
        .is_some_and(|ret| ret.as_str() == "void")
}

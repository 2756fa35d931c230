//! Method docstring compliance.
//!
//! Every declaration needs a docstring. Every parameter needs
//! `@param name[type] - ...` with the declared type written exactly. Methods
//! returning a value need `@return [type] - ...`.

use crate::config::FileKind;
use crate::model::{Declaration, Issue, MethodKind, MethodRecord};
use crate::parser::params;
use regex::Regex;
use std::path::Path;

/// Constructor by shape (`Class::Class`) or, in a header, a parameterless
/// method named after the file.
pub fn is_constructor(decl: &Declaration, path: &Path) -> bool {
    if decl.signature.kind == MethodKind::Constructor {
        return true;
    }
    let in_header = FileKind::from_path(path) == Some(FileKind::Header);
    let stem = path.file_stem().and_then(|s| s.to_str());
    let parameterless = params::parameter_list(&decl.signature.text)
        .is_some_and(|list| list.trim().is_empty());
    in_header && parameterless && stem == Some(decl.signature.bare_name())
}

/// True if `text` contains `@<tag>\s+<subject>[<ty>]\s*-`.
fn documents(text: &str, tag: &str, subject: &str, ty: &str) -> bool {
    let pattern = format!(
        r"@{}\s+{}\[{}\]\s*-",
        tag,
        regex::escape(subject),
        regex::escape(ty)
    );
    Regex::new(&pattern).is_ok_and(|re| re.is_match(text))
}

fn check_parameters(path: &Path, decl: &Declaration, doc_text: &str, doc_line: usize) -> Vec<Issue> {
    decl.params
        .iter()
        .filter(|p| !documents(doc_text, "param", &p.name, &p.ty))
        .map(|p| {
            Issue::new(
                path,
                doc_line,
                format!(
                    "Missing or incorrect @param for '{}' in method '{}' (expected '@param {}[{}] - ...')",
                    p.name, decl.signature.text, p.name, p.ty
                ),
            )
        })
        .collect()
}

fn check_return_type(path: &Path, decl: &Declaration, doc_text: &str, doc_line: usize) -> Option<Issue> {
    let sig = &decl.signature;
    let needs_return = sig.kind == MethodKind::Method
        && !sig.return_type.is_empty()
        && !params::returns_void(&sig.text);
    if !needs_return || documents(doc_text, "return", "", &sig.return_type) {
        return None;
    }
    Some(Issue::new(
        path,
        doc_line,
        format!(
            "Missing @return with type for non-void method '{}' (expected '@return [{}] - ...')",
            sig.text, sig.return_type
        ),
    ))
}

/// Check every method record of one file.
pub fn check_docstrings(path: &Path, methods: &[MethodRecord]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for record in methods {
        let decl = &record.declaration;
        let Some(doc) = &record.docstring else {
            issues.push(Issue::new(
                path,
                decl.start_line,
                format!("Method '{}' has no docstring", decl.signature.text),
            ));
            continue;
        };

        let doc_text = doc.text();
        issues.extend(check_parameters(path, decl, &doc_text, doc.start_line));
        if !is_constructor(decl, path) {
            issues.extend(check_return_type(path, decl, &doc_text, doc.start_line));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::extract_methods;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn run(file: &str, src: &str) -> Vec<String> {
        let lines: Vec<&str> = src.lines().collect();
        let methods = extract_methods(&lines);
        check_docstrings(Path::new(file), &methods)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn missing_return_only() {
        let src = indoc! {"
            /**
             * @param x[int] - value
             */
            int compute(int x);
        "};
        assert_eq!(
            run("Math.hpp", src),
            vec!["Math.hpp:1: Missing @return with type for non-void method 'int compute(int x);' (expected '@return [int] - ...')"]
        );
    }

    #[test]
    fn fully_documented_method() {
        let src = indoc! {"
            /**
             * Look up a vital.
             * @param id[std::string] - vital id
             * @param table[const std::map<int, std::string>&] - lookup table
             * @return [Vital*] - the vital, or nullptr
             */
            Vital* find(std::string id, const std::map<int, std::string>& table) const;
        "};
        assert!(run("Registry.hpp", src).is_empty());
    }

    #[test]
    fn param_type_must_match_literally() {
        let src = indoc! {"
            /**
             * @param name[string] - the name
             */
            void rename(const std::string& name);
        "};
        assert_eq!(
            run("Vital.hpp", src),
            vec!["Vital.hpp:1: Missing or incorrect @param for 'name' in method 'void rename(const std::string& name);' (expected '@param name[const std::string&] - ...')"]
        );
    }

    #[test]
    fn void_methods_need_no_return() {
        let src = "/** @param dt[int] - step */\nvoid update(int dt);\n/** Run. */\nvirtual void run() override;\n";
        assert!(run("Vital.hpp", src).is_empty());
    }

    #[test]
    fn constructors_and_destructors_need_no_return() {
        let src = indoc! {"
            /** @param base[int] - base value */
            Vital::Vital(int base) : base_(base) {}
            /** Destroy. */
            Vital::~Vital() {}
            /** Default. */
            Vital();
        "};
        assert!(run("Vital.hpp", src).is_empty());
    }

    #[test]
    fn file_named_constructor_rule_is_header_only() {
        let src = "/** Build. */\nVital build();\n";
        let lines: Vec<&str> = src.lines().collect();
        let methods = extract_methods(&lines);
        let decl = &methods[0].declaration;
        assert!(!is_constructor(decl, Path::new("Vital.hpp")));

        let src = "/** Make. */\nFactory* Factory();\n";
        let lines: Vec<&str> = src.lines().collect();
        let methods = extract_methods(&lines);
        let decl = &methods[0].declaration;
        assert!(is_constructor(decl, Path::new("include/Factory.hpp")));
        assert!(!is_constructor(decl, Path::new("Factory.cpp")));
    }

    #[test]
    fn pointer_return_glued_to_name() {
        let src = indoc! {"
            /**
             * @param id[int] - vital id
             * @return [Vital*] - the vital
             */
            Vital *find(int id);
            /**
             * @param n[int] - byte count
             * @return [void*] - the block
             */
            void *alloc(int n);
        "};
        assert!(run("Registry.hpp", src).is_empty());

        let src = "/** @param n[int] - count */\nvoid *alloc(int n);\n";
        assert_eq!(
            run("Pool.hpp", src),
            vec!["Pool.hpp:1: Missing @return with type for non-void method 'void *alloc(int n);' (expected '@return [void*] - ...')"]
        );
    }

    #[test]
    fn undocumented_method() {
        let src = "class Vital {\n    int max() const;\n};\n";
        assert_eq!(
            run("Vital.hpp", src),
            vec!["Vital.hpp:2: Method 'int max() const;' has no docstring"]
        );
    }

    #[test]
    fn each_missing_param_reported() {
        let src = "/** Resize. */\nvoid resize(int width, int height);\n";
        let issues = run("Canvas.hpp", src);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("'@param width[int] - ...'"));
        assert!(issues[1].contains("'@param height[int] - ...'"));
    }
}

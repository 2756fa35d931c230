//! Directory driver: discover files, run the checks, write header fixes.
//!
//! All parsing and checking happens on in-memory content through
//! [`check_content`]. Only [`check_file`] touches the filesystem, and a
//! read or write failure there becomes an issue for that file instead of
//! aborting the walk.

use crate::check::{check_docstrings, has_required_guard, normalize_header};
use crate::config::{CheckConfig, FileKind};
use crate::error::{CheckError, Result};
use crate::model::{Declaration, HeaderReport, Issue, LineChange, MethodRecord};
use crate::parser::blocks;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Everything computed for one file before any write happens.
#[derive(Debug, Default)]
pub struct FileCheck {
    pub header: HeaderReport,
    /// Header, guard and docstring issues, in that order
    pub issues: Vec<Issue>,
    pub methods: Vec<MethodRecord>,
}

/// Outcome of checking one file on disk.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: FileKind,
    pub issues: Vec<Issue>,
    pub changes: Vec<LineChange>,
    /// True if the header rewrite was written back
    pub written: bool,
    pub declarations: Vec<Declaration>,
}

/// Recursively collect recognized source and header files under `root`,
/// sorted by path.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CheckError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                log::warn!("skipping directory entry: {err}");
                continue;
            }
        };
        // path().is_file() follows symlinked files; symlinked dirs are not entered
        if entry.path().is_file() && FileKind::from_path(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }
    log::debug!("found {} files under {}", files.len(), root.display());
    Ok(files)
}

/// Run every enabled check over `content`. Pure: nothing is written.
pub fn check_content(path: &Path, kind: FileKind, content: &str, config: &CheckConfig) -> FileCheck {
    let mut header = normalize_header(path, content);
    let mut issues = std::mem::take(&mut header.issues);

    let lines: Vec<&str> = content.lines().collect();
    if kind == FileKind::Header {
        issues.extend(has_required_guard(path, &lines));
    }

    let docstrings = config.check_docstrings && kind == FileKind::Header;
    let methods = if docstrings || config.list_declarations {
        blocks::extract_methods(&lines)
    } else {
        Vec::new()
    };
    if docstrings {
        issues.extend(check_docstrings(path, &methods));
    }

    FileCheck {
        header,
        issues,
        methods,
    }
}

/// Replace `path` with `content` through a temporary file in the same
/// directory, so readers never see a partial write.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let write_err = |source| CheckError::Write {
        path: path.to_path_buf(),
        source,
    };
    // Write through symlinks instead of replacing the link itself
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    if let Ok(meta) = fs::metadata(&target) {
        fs::set_permissions(tmp.path(), meta.permissions()).map_err(write_err)?;
    }
    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Read, check and (unless dry-running) normalize one file.
pub fn check_file(path: &Path, kind: FileKind, config: &CheckConfig) -> FileReport {
    let mut report = FileReport {
        path: path.to_path_buf(),
        kind,
        issues: Vec::new(),
        changes: Vec::new(),
        written: false,
        declarations: Vec::new(),
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) => {
            let err = CheckError::Read {
                path: path.to_path_buf(),
                source,
            };
            log::warn!("{err}");
            report
                .issues
                .push(Issue::new(path, 1, format!("could not read file: {err}")));
            return report;
        }
    };

    let check = check_content(path, kind, &content, config);
    report.issues = check.issues;
    report.declarations = check
        .methods
        .into_iter()
        .map(|m| m.declaration)
        .collect();

    if check.header.is_modified() {
        if config.dry_run {
            log::info!("{}: header rewrite skipped (dry run)", path.display());
        } else {
            match write_atomic(path, &check.header.apply(&content)) {
                Ok(()) => {
                    log::info!(
                        "{}: rewrote {} header line(s)",
                        path.display(),
                        check.header.changes.len()
                    );
                    report.written = true;
                }
                Err(err) => {
                    log::warn!("{err}");
                    report.issues.push(Issue::new(
                        path,
                        check.header.block.as_ref().map_or(1, |b| b.start_line),
                        format!("could not write normalized header: {err}"),
                    ));
                }
            }
        }
        report.changes = check.header.changes;
    }

    report
}

/// Check every recognized file under `config.root`, in path order.
pub fn check_directory(config: &CheckConfig) -> Result<Vec<FileReport>> {
    let files = discover_files(&config.root)?;
    let reports = files
        .iter()
        .filter_map(|path| {
            let kind = FileKind::from_path(path)?;
            log::debug!("checking {}", path.display());
            Some(check_file(path, kind, config))
        })
        .collect();
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const LEGACY_HEADER: &str = indoc! {"
        /**
         * File: Vital.hpp
         * Author: Jane Doe
         * Created on: 2020-01-01
         */
        class Vital {
        public:
            int max() const;
        };
    "};

    fn messages(issues: &[Issue]) -> Vec<String> {
        issues.iter().map(|i| i.message.clone()).collect()
    }

    #[test]
    fn header_issues_then_guard() {
        let check = check_content(
            Path::new("Vital.hpp"),
            FileKind::Header,
            "int x;\n",
            &CheckConfig::default(),
        );
        assert_eq!(
            messages(&check.issues),
            vec![
                "No header comment found",
                "Missing include guard (expected '#pragma once' directive)",
            ]
        );
    }

    #[test]
    fn sources_skip_guard_and_docstrings() {
        let config = CheckConfig {
            check_docstrings: true,
            ..Default::default()
        };
        let content = "/**\n * @file main.cpp\n * @author Jane\n */\nint main();\n";
        let check = check_content(Path::new("main.cpp"), FileKind::Source, content, &config);
        assert!(check.issues.is_empty(), "{:?}", check.issues);
        assert!(check.methods.is_empty());
    }

    #[test]
    fn docstrings_only_when_enabled() {
        let content = "/**\n * @file Vital.hpp\n * @author Jane\n */\n#pragma once\nint max() const;\n";
        let off = check_content(Path::new("Vital.hpp"), FileKind::Header, content, &CheckConfig::default());
        assert!(off.issues.is_empty());

        let config = CheckConfig {
            check_docstrings: true,
            ..Default::default()
        };
        let on = check_content(Path::new("Vital.hpp"), FileKind::Header, content, &config);
        assert_eq!(
            messages(&on.issues),
            vec!["Method 'int max() const;' has no docstring"]
        );
    }

    #[test]
    fn discover_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        for name in ["b.cpp", "a.hpp", "notes.txt", "sub/c.h"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let files = discover_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.hpp", "b.cpp", "sub/c.h"]);
    }

    #[cfg(unix)]
    #[test]
    fn discover_includes_symlinked_files() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let target = outside.path().join("Shared.hpp");
        fs::write(&target, "").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("Shared.hpp")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.cpp"), dir.path().join("dangling.cpp")).unwrap();

        let files = discover_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("Shared.hpp")]);
    }

    #[cfg(unix)]
    #[test]
    fn rewrite_goes_through_symlink() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("real.hpp");
        fs::write(&target, LEGACY_HEADER.replace("Vital.hpp", "link.hpp")).unwrap();
        let link = dir.path().join("link.hpp");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let report = check_file(&link, FileKind::Header, &CheckConfig::default());
        assert!(report.written);
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(fs::read_to_string(&target).unwrap().contains(" * @file link.hpp\n"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = discover_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CheckError::NotADirectory(_)));
    }

    #[test]
    fn check_file_rewrites_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Vital.hpp");
        fs::write(&path, LEGACY_HEADER).unwrap();

        let report = check_file(&path, FileKind::Header, &CheckConfig::default());
        assert!(report.written);
        assert_eq!(report.changes.len(), 3);
        assert_eq!(
            messages(&report.issues),
            vec!["Missing include guard (expected '#pragma once' directive)"]
        );

        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(rewritten.starts_with("/**\n * @file Vital.hpp\n * @author Jane Doe\n * @date 2020-01-01\n */\n"));
        assert!(rewritten.ends_with("    int max() const;\n};\n"));

        let again = check_file(&path, FileKind::Header, &CheckConfig::default());
        assert!(!again.written);
        assert!(again.changes.is_empty());
    }

    #[test]
    fn dry_run_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Vital.hpp");
        fs::write(&path, LEGACY_HEADER).unwrap();

        let config = CheckConfig {
            dry_run: true,
            ..Default::default()
        };
        let report = check_file(&path, FileKind::Header, &config);
        assert!(!report.written);
        assert_eq!(report.changes.len(), 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), LEGACY_HEADER);
    }

    #[test]
    fn unreadable_file_becomes_an_issue() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.cpp");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let report = check_file(&path, FileKind::Source, &CheckConfig::default());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].line, 1);
        assert!(report.issues[0].message.starts_with("could not read file:"));
    }

    #[test]
    fn directory_walk_continues_past_bad_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.cpp"), [0xff, 0xfe]).unwrap();
        fs::write(
            dir.path().join("b.cpp"),
            "/**\n * @file b.cpp\n * @author Jane\n */\n",
        )
        .unwrap();

        let config = CheckConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let reports = check_directory(&config).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].issues.len(), 1);
        assert!(reports[1].issues.is_empty());
    }
}

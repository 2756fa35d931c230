//! Heuristic documentation checker for C++ projects.
//!
//! Walks a source tree and, for every `.cpp`/`.hpp` style file:
//!
//! 1. **Header**: normalizes legacy `File:`/`Author:`/`Date:` spellings in
//!    the first `/** ... */` block and requires `@file <name>` and `@author`
//! 2. **Guard**: headers need `#pragma once` (or a matching
//!    `#ifndef`/`#define` pair)
//! 3. **Docstrings** (opt-in): every method declaration in a header needs a
//!    docstring with typed `@param` and `@return` tags
//!
//! The parsing is line based and regex driven; it does not understand C++.

pub mod check;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod walk;

pub use config::{CheckConfig, FileKind};
pub use error::{CheckError, Result};
pub use model::Issue;
pub use walk::{check_directory, FileReport};

//! Per-file checks run by the directory driver.

pub mod docstring;
pub mod guard;
pub mod header;

pub use docstring::check_docstrings;
pub use guard::has_required_guard;
pub use header::normalize_header;

//! Heuristic C++ declaration parsing.
//!
//! Nothing in here builds an AST. [`signature`] guesses whether a line is a
//! declaration, [`params`] splits its parameter list and [`blocks`] pairs
//! declarations with the docstring block in front of them.

pub mod blocks;
pub mod params;
pub mod signature;

pub use blocks::{extract_methods, find_first_block};
pub use params::{extract_parameters, returns_void};
pub use signature::match_declaration;

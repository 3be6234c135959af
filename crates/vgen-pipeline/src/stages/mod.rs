//! Stage implementations.
//!
//! Each stage reads its inputs from the project directory and overwrites
//! its outputs there, so any stage can be re-run (or run standalone from
//! the CLI) against an existing project.

pub mod assemble;
pub mod discover;
pub mod images;
pub mod narrate;
pub mod script;
pub mod upload;

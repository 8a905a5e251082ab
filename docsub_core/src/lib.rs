//! `docsub_core` is the core library for the docsub tool. It pulls named
//! doc-strings out of comment blocks in source files and substitutes them
//! into `@DocString(name)` placeholders in documentation files.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source file
//!   → Markers (classify each trimmed line)
//!   → Extractor (state machine: Outside → AwaitingBody → InBlock → Outside)
//!   → DocStringTable (name → ordered `tag: text` lines)
//! Documentation file + DocStringTable
//!   → Substitutor (replace placeholders with flattened, escaped text)
//!   → Atomic write (temp file in the same directory, renamed over the target)
//! ```
//!
//! ## Source Syntax
//!
//! ```text
//! // DocString: track
//! //! brief Track particles across frames.
//!
//! // DocString: piv
//! /*! brief Run PIV on an image pair.
//!     \param window Interrogation window size.
//!     \return Velocity field.
//! */
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docsub_core::DocSubOptions;
//! use docsub_core::extract_file;
//! use docsub_core::substitute_file;
//! use std::path::Path;
//!
//! let options = DocSubOptions::default();
//! let table = extract_file(Path::new("src/piv.cpp"), &options).unwrap();
//! let result = substitute_file(Path::new("docs/python.md"), &table, &options).unwrap();
//! println!("replaced {} placeholder(s)", result.replaced);
//! ```

pub use config::*;
pub use error::*;
pub use extractor::*;
pub use substitutor::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod extractor;
pub mod io;
pub mod markers;
mod substitutor;

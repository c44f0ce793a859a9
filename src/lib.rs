//! Canonical normalization of human-authored LaTeX math fragments.
//!
//! Ambiguous, hand-written LaTeX math allows many spellings of the same
//! formula: `\frac12`, `\frac1{2}` and `\frac{1}{2}` render identically,
//! `sinx` means `\sin x`, superscripts and subscripts attach in either
//! order. This crate re-tokenizes such input with a context-sensitive
//! lexer, parses it by recursive descent through a marker registry, and
//! re-serializes the tree under a configurable policy so downstream
//! consumers (rendering, diffing, deduplication) can compare formulas
//! deterministically.
//!
//! ```
//! use texnorm::{normalize_expression, NormContext, Settings};
//!
//! let ctx = NormContext::default();
//! let settings = Settings::default();
//!
//! let canonical = normalize_expression(&ctx, r"\frac12", &settings)?;
//! assert_eq!(canonical, r"\frac{1}{2}");
//!
//! let canonical = normalize_expression(&ctx, "sinxcosx", &settings)?;
//! assert_eq!(canonical, r"\sin(x) \cos(x)");
//! # Ok::<(), texnorm::NormalizeError>(())
//! ```
//!
//! Whole sentences mix literal text with `$...$` formula spans:
//!
//! ```
//! use texnorm::{normalize_in_sentence, NormContext, Settings};
//!
//! let ctx = NormContext::default();
//! let settings = Settings::builder().normalize_token(true).build();
//! let out = normalize_in_sentence(&ctx, r"so $x\geqslant y$ holds", &settings)?;
//! assert_eq!(out, r"so $x \ge y$ holds");
//! # Ok::<(), texnorm::NormalizeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::str_to_string)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod context;
pub mod core;
mod functions;
pub mod lexer;
pub mod mapping;
pub mod namespace;
pub mod parser;
pub mod registry;
pub mod types;

pub use context::NormContext;
pub use core::{normalize_expression, normalize_in_sentence};
pub use types::{GroupOption, NormalizeError, Policy, Settings};

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

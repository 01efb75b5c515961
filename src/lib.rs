//! mdindent
//!
//! An indentation linter for markdown documents.
//!
//! This library provides:
//! - A positioned-syntax-tree front-end for markdown
//! - Indentation validation with precise, auto-fixable diagnostics
//! - Configuration management

pub mod config;
pub mod core;
pub mod parser;
pub mod validation;

// Re-exports for clean public API
pub use crate::config::{Config, LintOptions};
pub use crate::core::Document;
pub use crate::parser::{Node, NodeKind, parse};
pub use crate::validation::{Diagnostic, FixEdit, lint, lint_source};

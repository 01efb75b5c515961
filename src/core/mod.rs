//! Core Document Handling
//!
//! Source-text ownership shared by the parser front-end and the validation
//! passes.

pub mod document;

pub use document::Document;

//! Announcement Compiler - widget documents to email-safe HTML
//!
//! # Guarantees
//! 1. Every style is inline. No `<style>` blocks, no classes.
//! 2. Every user string is escaped; theme tokens are trusted CSS.
//! 3. Same document in, same bytes out.
//! 4. Compilation never mutates or fails on its input.

pub mod color;
pub mod compiler;
pub mod document;
pub mod edit;
pub mod error;
pub mod escape;
pub mod hashing;
pub mod model;
pub mod storage;
pub mod templates;
pub mod validation;
pub mod widgets;

pub use color::{adjust, to_rgba};
pub use compiler::{compile, compile_checked, CompiledDocument, Compiler};
pub use error::AnnounceError;
pub use escape::escape_html;
pub use model::{EmailConfig, FooterConfig, HeaderConfig, Section, Theme, Widget, WidgetKind, WidgetType};
pub use templates::{TemplateLibrary, TemplateRegistry};
pub use validation::{ValidationResult, ValidationViolation, ViolationSeverity};

pub type Result<T> = std::result::Result<T, AnnounceError>;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

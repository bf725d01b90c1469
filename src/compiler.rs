//! Compilation - single entry point from document to HTML
//!
//! `compile` is total: every document yields a complete page, with
//! unrecognized widgets left out. `compile_checked` surfaces those shape
//! faults to the caller instead.

use serde::Serialize;

use crate::document::render_document;
use crate::hashing::{config_hash, content_hash};
use crate::model::EmailConfig;
use crate::validation::{ValidationResult, Validator};
use crate::{AnnounceError, Result, ENGINE_VERSION};

/// Compile a document to a self-contained, inline-styled HTML page.
pub fn compile(config: &EmailConfig) -> String {
    tracing::debug!(
        sections = config.sections.len(),
        widgets = config.widget_count(),
        "compiling document"
    );
    let html = render_document(config);
    tracing::debug!(bytes = html.len(), "compiled document");
    html
}

/// Like [`compile`], but fails when validation finds an error.
pub fn compile_checked(config: &EmailConfig) -> Result<String> {
    Compiler::new()
        .compile_document(config)
        .map(|compiled| compiled.html)
}

/// Compiled page plus the manifest describing it.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledDocument {
    #[serde(skip)]
    pub html: String,
    pub engine_version: String,
    pub config_hash: String,
    pub content_hash: String,
    pub section_count: usize,
    pub widget_count: usize,
    pub validation: ValidationResult,
}

pub struct Compiler {
    validator: Validator,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            validator: Validator::new(),
        }
    }

    pub fn check(&self, config: &EmailConfig) -> ValidationResult {
        self.validator.validate(config)
    }

    /// Validate, then compile. Warnings are carried in the result; errors
    /// reject the document.
    pub fn compile_document(&self, config: &EmailConfig) -> Result<CompiledDocument> {
        let validation = self.check(config);

        if validation.has_errors() {
            let messages: Vec<_> = validation
                .errors()
                .map(|v| format!("{} at {}: {}", v.rule, v.location, v.message))
                .collect();
            return Err(AnnounceError::InvalidDocument(messages.join("; ")));
        }

        for warning in &validation.violations {
            tracing::warn!(rule = %warning.rule, location = %warning.location, "{}", warning.message);
        }

        let html = compile(config);

        Ok(CompiledDocument {
            content_hash: content_hash(&html),
            config_hash: config_hash(config)?,
            engine_version: ENGINE_VERSION.to_string(),
            section_count: config.sections.len(),
            widget_count: config.widget_count(),
            validation,
            html,
        })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

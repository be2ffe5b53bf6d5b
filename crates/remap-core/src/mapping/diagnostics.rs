//! Collector for recoverable mapping deviations
//!
//! The engine never aborts on a per-entry coercion or formatting failure;
//! it records what happened here and continues. The collector is owned by
//! the call and returned with the result document, replacing any global
//! warning side channel.
//!
//! Copyright (c) 2025 Remap Team
//! Licensed under the MIT OR Apache-2.0 license

use serde_json::Value;

use crate::error::{DiagnosticCode, Severity};
use crate::types::Diagnostic;

/// Accumulates [`Diagnostic`] values during one mapping execution
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed type coercion; the entry's value is left as it was
    /// before the attempt
    pub fn add_coercion_failure(
        &mut self,
        entry: usize,
        path: &str,
        message: String,
        value: Option<Value>,
    ) {
        self.push(DiagnosticCode::CoercionFailed, entry, path, message, value);
    }

    /// Record a failed date-time reformat; the entry's value is left as it
    /// was after coercion
    pub fn add_format_failure(
        &mut self,
        entry: usize,
        path: &str,
        message: String,
        value: Option<Value>,
    ) {
        self.push(DiagnosticCode::FormatFailed, entry, path, message, value);
    }

    /// Record a lossy multi-wildcard write that discarded index information
    pub fn add_index_collapse(&mut self, entry: usize, path: &str, value: Option<Value>) {
        self.push(
            DiagnosticCode::IndexCollapse,
            entry,
            path,
            format!("multi-wildcard write '{path}' collapsed all elements onto index 0"),
            value,
        );
    }

    fn push(
        &mut self,
        code: DiagnosticCode,
        entry: usize,
        path: &str,
        message: String,
        value: Option<Value>,
    ) {
        self.items.push(Diagnostic {
            code,
            path: path.to_string(),
            entry,
            message,
            severity: determine_severity(code),
            value,
        });
    }

    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Diagnostic> {
        self.items
    }
}

fn determine_severity(code: DiagnosticCode) -> Severity {
    match code {
        DiagnosticCode::CoercionFailed | DiagnosticCode::FormatFailed => Severity::Warning,
        DiagnosticCode::IndexCollapse => Severity::Info,
    }
}

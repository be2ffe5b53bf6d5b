//! Core data types for mapping specifications
//!
//! This module defines the serde data model consumed by the mapping engine:
//! specifications, entries, endpoints and their shorthand forms, target
//! types for coercion, and the diagnostic/outcome types returned from a
//! mapping call.
//!
//! The wire format follows the conventions of existing mapping documents:
//! `isReversible`, `propertyMap`, two-element entry arrays, and endpoints
//! written either as a bare path string, `null`, or a full descriptor
//! object. Transform hooks are code-only and never serialized.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DiagnosticCode, Severity};

/// A mapping specification: an ordered list of field correspondences
///
/// `is_reversible` is author-declared, not derived; it governs whether
/// reverse execution is permitted, not whether the mapping is actually
/// lossless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingSpec {
    /// Whether this specification may be executed with endpoints swapped
    #[serde(rename = "isReversible", default)]
    pub is_reversible: bool,

    /// The ordered field correspondences; later entries may overwrite
    /// values written by earlier ones at overlapping paths
    #[serde(rename = "propertyMap", default)]
    pub entries: Vec<MappingEntry>,
}

impl MappingSpec {
    /// Create a specification from its entries
    pub fn new(is_reversible: bool, entries: Vec<MappingEntry>) -> Self {
        Self {
            is_reversible,
            entries,
        }
    }
}

/// One field correspondence: a `(left, right)` endpoint pair
///
/// Forward execution reads from `left` and writes to `right`; reverse
/// execution swaps the roles. Serialized as a two-element JSON array whose
/// elements may each be `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingEntry(pub Option<Endpoint>, pub Option<Endpoint>);

impl MappingEntry {
    pub fn new(left: Option<Endpoint>, right: Option<Endpoint>) -> Self {
        Self(left, right)
    }

    /// Resolve the `(read, write)` endpoints for the given direction,
    /// normalizing each side to its canonical descriptor form
    pub fn endpoints(&self, reverse: bool) -> (EndpointDescriptor, EndpointDescriptor) {
        let (read, write) = if reverse {
            (&self.1, &self.0)
        } else {
            (&self.0, &self.1)
        };
        (normalize(read), normalize(write))
    }
}

fn normalize(endpoint: &Option<Endpoint>) -> EndpointDescriptor {
    match endpoint {
        None => EndpointDescriptor::default(),
        Some(Endpoint::Path(path)) => EndpointDescriptor {
            key: Some(path.clone()),
            ..EndpointDescriptor::default()
        },
        Some(Endpoint::Descriptor(descriptor)) => descriptor.clone(),
    }
}

/// One side of a mapping entry
///
/// On the wire an endpoint is either a bare path string (shorthand for a
/// descriptor with only `key` set) or a full descriptor object. An omitted
/// side is represented as `None` on the [`MappingEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    /// Bare path shorthand
    Path(String),
    /// Full descriptor
    Descriptor(EndpointDescriptor),
}

impl From<&str> for Endpoint {
    fn from(path: &str) -> Self {
        Endpoint::Path(path.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(path: String) -> Self {
        Endpoint::Path(path)
    }
}

impl From<EndpointDescriptor> for Endpoint {
    fn from(descriptor: EndpointDescriptor) -> Self {
        Endpoint::Descriptor(descriptor)
    }
}

/// Canonical endpoint descriptor
///
/// `kind`, `format`, `pattern` and `default` only have meaning on the side
/// being written to; `pattern` on the read side supplies the parse format
/// for `date-time` values. `transform_value`, when present on the write
/// side, fully overrides coercion, formatting and defaulting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointDescriptor {
    /// Structural path on this side, or `None` for "no path on this side"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Target type the written value is coerced to
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TargetType>,

    /// Declared value format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,

    /// Date-time pattern (parse pattern on the read side, output pattern
    /// on the write side)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Fallback written when the read side resolves to nothing
    ///
    /// An explicit JSON `null` is a real default (null gets written); only
    /// an absent field means "no default"
    #[serde(deserialize_with = "present_value", skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Code-only transform hook; never serialized
    #[serde(skip)]
    pub transform_value: Option<TransformFn>,
}

/// Deserializes a present field to `Some`, even when its value is `null`
/// (the struct-level default covers the absent case)
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl EndpointDescriptor {
    /// Descriptor addressing `path` with no further behavior
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            key: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: TargetType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_transform(mut self, transform: TransformFn) -> Self {
        self.transform_value = Some(transform);
        self
    }
}

/// Target primitive/shape kind for coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    String,
    Number,
    Null,
    Boolean,
    Array,
    Object,
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::String => write!(f, "string"),
            TargetType::Number => write!(f, "number"),
            TargetType::Null => write!(f, "null"),
            TargetType::Boolean => write!(f, "boolean"),
            TargetType::Array => write!(f, "array"),
            TargetType::Object => write!(f, "object"),
        }
    }
}

/// Declared value formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueFormat {
    #[serde(rename = "date-time")]
    DateTime,
}

/// Options controlling a mapping execution
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Execute the specification with endpoints swapped
    pub reverse: bool,
}

impl MapOptions {
    pub fn reversed() -> Self {
        Self { reverse: true }
    }
}

/// Arguments handed to a [`TransformFn`]
///
/// `left` is the endpoint being read and `right` the endpoint being written
/// as resolved for the current direction; `source` is the whole source
/// document.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// The raw value read from the source, if any
    pub value: Option<&'a Value>,
    /// The read-side endpoint, normalized
    pub left: &'a EndpointDescriptor,
    /// The write-side endpoint, normalized
    pub right: &'a EndpointDescriptor,
    /// The whole source document
    pub source: &'a Value,
}

/// A user-supplied value transform
///
/// The return value is written as-is; returning `None` skips the entry.
#[derive(Clone)]
pub struct TransformFn(Arc<dyn Fn(TransformContext<'_>) -> Option<Value> + Send + Sync>);

impl TransformFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(TransformContext<'_>) -> Option<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, context: TransformContext<'_>) -> Option<Value> {
        (self.0)(context)
    }
}

impl fmt::Debug for TransformFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TransformFn")
    }
}

/// A recoverable deviation recorded during mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What happened
    pub code: DiagnosticCode,
    /// The write-side path of the affected entry
    pub path: String,
    /// Index of the affected entry in the specification
    pub entry: usize,
    /// Human-readable description
    pub message: String,
    /// How serious it is
    pub severity: Severity,
    /// The value involved, as it was immediately before the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// The result of a mapping execution: the built document plus every
/// recoverable deviation recorded along the way
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingOutcome {
    pub document: Value,
    pub diagnostics: Vec<Diagnostic>,
}

//! Remap Core - declarative, bidirectional structural mapping for JSON documents
//!
//! This crate translates a source JSON-like document into a target document
//! by following a mapping specification: an ordered list of field
//! correspondences, each naming a path to read, a path to write, and
//! optional coercion, formatting, defaulting or transform behavior. A
//! specification marked reversible can be run in the opposite direction to
//! regenerate an approximation of the original source.
//!
//! # Main Components
//!
//! - **Error Handling**: fatal precondition failures via [`Error`];
//!   recoverable per-entry failures collected as [`Diagnostic`] values
//! - **Core Types**: specifications, entries, endpoints and their wire
//!   shorthand forms
//! - **Mapping Engine**: path resolution (including the `[]` array
//!   wildcard), type coercion, date-time reformatting, and the
//!   reversibility contract
//!
//! # Example
//!
//! ```
//! use remap_core::{map, MapOptions, MappingSpec};
//! use serde_json::json;
//!
//! let spec: MappingSpec = serde_json::from_value(json!({
//!     "isReversible": true,
//!     "propertyMap": [
//!         ["name.first", "first_name"],
//!         ["name.last", "last_name"]
//!     ]
//! })).unwrap();
//!
//! let source = json!({"name": {"first": "Michael", "last": "Shick"}});
//! let result = map(&source, &spec, MapOptions::default()).unwrap();
//! assert_eq!(result, json!({"first_name": "Michael", "last_name": "Shick"}));
//!
//! // reversible specifications run the other way too
//! let back = map(&result, &spec, MapOptions::reversed()).unwrap();
//! assert_eq!(back, source);
//! ```

pub mod error;
pub mod mapping;
pub mod types;

// Re-export main types for convenience
pub use error::{DiagnosticCode, Error, Result, Severity};
pub use mapping::{compile, map, map_with_diagnostics, Diagnostics, WildcardWrite};
pub use types::{
    // Specification types
    Endpoint, EndpointDescriptor, MappingEntry, MappingSpec,

    // Coercion and formatting
    TargetType, ValueFormat,

    // Execution types
    Diagnostic, MapOptions, MappingOutcome, TransformContext, TransformFn,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

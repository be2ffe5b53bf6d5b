//! The mapping engine: bidirectional, entry-ordered document translation
//!
//! This module implements the core execution algorithm. For each entry of a
//! specification, in declared order, the engine resolves the read endpoint
//! against the source document, passes the value through the entry's
//! transform or its coercion/format/default pipeline, and writes the result
//! into the document being built. Reverse execution swaps the endpoint
//! roles, subject to the reversibility contract enforced by [`guard`].
//!
//! Copyright (c) 2025 Remap Team
//! Licensed under the MIT OR Apache-2.0 license

pub mod coerce;
pub mod datetime;
pub mod diagnostics;
pub mod guard;
pub mod path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::{
    EndpointDescriptor, MapOptions, MappingOutcome, MappingSpec, TransformContext, ValueFormat,
};

pub use diagnostics::Diagnostics;
pub use path::WildcardWrite;

/// Execute a mapping specification against a source document
///
/// Recoverable per-entry failures (coercion, date-time formatting) are
/// logged as warnings identifying the offending entry; use
/// [`map_with_diagnostics`] to receive them as values instead.
///
/// # Errors
///
/// Fails when the source document is not structured, when `reverse` is
/// requested against a non-reversible specification, or when a reversible
/// specification reads through a path with more than one wildcard.
///
/// # Example
///
/// ```
/// use remap_core::{map, MapOptions, MappingSpec};
/// use serde_json::json;
///
/// let spec: MappingSpec = serde_json::from_value(json!({
///     "isReversible": true,
///     "propertyMap": [
///         ["name.first", "first_name"],
///         ["name.last", "last_name"]
///     ]
/// })).unwrap();
///
/// let source = json!({"name": {"first": "Michael", "last": "Shick"}});
/// let result = map(&source, &spec, MapOptions::default()).unwrap();
/// assert_eq!(result, json!({"first_name": "Michael", "last_name": "Shick"}));
/// ```
pub fn map(source: &Value, spec: &MappingSpec, options: MapOptions) -> Result<Value> {
    let outcome = map_with_diagnostics(source, spec, options)?;
    for diagnostic in &outcome.diagnostics {
        log::warn!(
            "{} at '{}' (entry {}): {}",
            diagnostic.code,
            diagnostic.path,
            diagnostic.entry,
            diagnostic.message
        );
    }
    Ok(outcome.document)
}

/// Execute a mapping specification, returning the built document together
/// with every recoverable deviation recorded along the way
pub fn map_with_diagnostics(
    source: &Value,
    spec: &MappingSpec,
    options: MapOptions,
) -> Result<MappingOutcome> {
    if !source.is_object() && !source.is_array() {
        return Err(Error::Validation {
            field: "source".to_string(),
            message: "source document must be a structured value".to_string(),
            expected: Some("object or array".to_string()),
        });
    }
    guard::check_direction(spec, options)?;

    let mut diagnostics = Diagnostics::new();
    let mut result = Value::Object(Map::new());

    for (index, entry) in spec.entries.iter().enumerate() {
        let (read, write) = entry.endpoints(options.reverse);
        apply_entry(
            source,
            spec.is_reversible,
            index,
            &read,
            &write,
            &mut result,
            &mut diagnostics,
        )?;
    }

    Ok(MappingOutcome {
        document: result,
        diagnostics: diagnostics.into_items(),
    })
}

/// Bind a specification and options into a reusable mapping function
pub fn compile(
    spec: MappingSpec,
    options: MapOptions,
) -> impl Fn(&Value) -> Result<Value> + Send + Sync {
    move |source| map(source, &spec, options)
}

fn apply_entry(
    source: &Value,
    is_reversible: bool,
    index: usize,
    read: &EndpointDescriptor,
    write: &EndpointDescriptor,
    result: &mut Value,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    // an entry with no write-side key is always a no-op
    let Some(write_key) = write.key.as_deref() else {
        return Ok(());
    };

    let mut value: Option<Value> = None;
    if let Some(read_key) = read.key.as_deref() {
        if path::has_wildcard(read_key) {
            guard::check_read_path(is_reversible, read_key)?;
            value = path::get_wildcard(source, read_key);
        } else {
            value = path::get_path(source, read_key).cloned();
        }
    }

    if let Some(transform) = &write.transform_value {
        // a transform fully overrides coercion, formatting and defaulting
        value = transform.apply(TransformContext {
            value: value.as_ref(),
            left: read,
            right: write,
            source,
        });
    } else {
        if let Some(mut current) = value.take() {
            if let Some(target) = write.kind {
                match coerce::coerce(&current, target) {
                    Ok(coerced) => current = coerced,
                    Err(error) => diagnostics.add_coercion_failure(
                        index,
                        write_key,
                        format!("value could not be coerced to {target}: {error}"),
                        Some(current.clone()),
                    ),
                }
            }
            if write.format == Some(ValueFormat::DateTime) {
                match datetime::reformat(
                    &current,
                    read.pattern.as_deref(),
                    write.pattern.as_deref(),
                ) {
                    Ok(formatted) => current = formatted,
                    Err(error) => diagnostics.add_format_failure(
                        index,
                        write_key,
                        format!("value could not be formatted: {error}"),
                        Some(current.clone()),
                    ),
                }
            }
            value = Some(current);
        }
        if value.is_none() {
            value = write.default.clone();
        }
    }

    let Some(value) = value else {
        return Ok(());
    };

    if path::has_wildcard(write_key) {
        let snapshot = if path::wildcard_count(write_key) > 1 {
            Some(value.clone())
        } else {
            None
        };
        if path::set_wildcard(result, write_key, value) == WildcardWrite::Collapsed {
            diagnostics.add_index_collapse(index, write_key, snapshot);
        }
    } else {
        path::set_path(result, write_key, value);
    }

    Ok(())
}

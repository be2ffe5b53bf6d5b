//! Structural path resolution over JSON values
//!
//! Paths are dotted strings (`a.b.c`) whose segments may also be written in
//! bracket notation (`a[0].b`); all-digit segments address array indices.
//! A path may additionally contain literal `[]` wildcard segments meaning
//! "for every element of the array at this position".
//!
//! Reads return `None` when any hop is absent; writes create intermediate
//! containers as needed. Wildcard writes with more than one `[]` segment
//! cannot recover index information and collapse the value onto index 0 at
//! every wildcard level; callers are told via [`WildcardWrite::Collapsed`]
//! so they can surface a diagnostic.
//!
//! Copyright (c) 2025 Remap Team
//! Licensed under the MIT OR Apache-2.0 license

use serde_json::{Map, Value};

/// The literal array-wildcard marker
pub const WILDCARD: &str = "[]";

/// Whether `path` contains at least one wildcard segment
pub fn has_wildcard(path: &str) -> bool {
    path.contains(WILDCARD)
}

/// Number of wildcard segments in `path`
pub fn wildcard_count(path: &str) -> usize {
    path.matches(WILDCARD).count()
}

/// Outcome of a wildcard write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardWrite {
    /// Elements were written at their original indices
    Indexed,
    /// Index information was discarded; the whole value landed on index 0
    /// at every wildcard level
    Collapsed,
}

/// One parsed path segment
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

fn parse_segments(path: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => flush(&mut current, &mut segments),
            '[' => {
                flush(&mut current, &mut segments);
                let mut inner = String::new();
                for b in chars.by_ref() {
                    if b == ']' {
                        break;
                    }
                    inner.push(b);
                }
                if !inner.is_empty() {
                    segments.push(segment_from(inner));
                }
            }
            _ => current.push(c),
        }
    }
    flush(&mut current, &mut segments);
    segments
}

fn flush(current: &mut String, segments: &mut Vec<Segment>) {
    if !current.is_empty() {
        segments.push(segment_from(std::mem::take(current)));
    }
}

fn segment_from(raw: String) -> Segment {
    if raw.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(index) = raw.parse::<usize>() {
            return Segment::Index(index);
        }
    }
    Segment::Key(raw)
}

/// Read the value at `path`, or `None` if any hop is absent
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = root;
    for segment in parse_segments(path) {
        current = match (&segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(key)?,
            (Segment::Index(index), Value::Array(items)) => items.get(*index)?,
            // numeric lookups against an object address the decimal string key
            (Segment::Index(index), Value::Object(map)) => map.get(&index.to_string())?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write `value` at `path`, creating intermediate objects/arrays as needed
///
/// An intermediate hop becomes an array when the next segment is an index
/// and an object otherwise; scalar intermediates are replaced. Arrays are
/// padded with `null` up to the target index.
pub fn set_path(root: &mut Value, path: &str, value: Value) {
    let segments = parse_segments(path);
    if segments.is_empty() {
        return;
    }
    set_segments(root, &segments, value);
}

fn set_segments(target: &mut Value, segments: &[Segment], value: Value) {
    let (head, rest) = match segments.split_first() {
        Some(split) => split,
        None => {
            *target = value;
            return;
        }
    };
    match head {
        Segment::Key(key) => set_member(target, key.clone(), rest, value),
        Segment::Index(index) => {
            // an existing object takes the index as a string key
            if target.is_object() {
                set_member(target, index.to_string(), rest, value);
            } else {
                set_element(target, *index, rest, value);
            }
        }
    }
}

fn set_member(target: &mut Value, key: String, rest: &[Segment], value: Value) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        let slot = map.entry(key).or_insert(Value::Null);
        set_segments(slot, rest, value);
    }
}

fn set_element(target: &mut Value, index: usize, rest: &[Segment], value: Value) {
    if !target.is_array() {
        *target = Value::Array(Vec::new());
    }
    if let Value::Array(items) = target {
        while items.len() <= index {
            items.push(Value::Null);
        }
        set_segments(&mut items[index], rest, value);
    }
}

/// JS truthiness over JSON values: `null`, `false`, `0` and `""` are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn trim_leading_dot(part: &str) -> &str {
    part.strip_prefix('.').unwrap_or(part)
}

/// Read a wildcard path, projecting the array at the first `[]` position
///
/// Returns `None` when the base of the first wildcard is absent. Each
/// element is read at the remaining sub-path, substituting `null` where the
/// result is absent or falsy; a terminal wildcard projects every element to
/// `null` by the same rule. Levels past the first wildcard assume every
/// cell is a one-element array and read position 0, which only faithfully
/// reconstructs structures that truly nest one element per cell.
pub fn get_wildcard(root: &Value, path: &str) -> Option<Value> {
    let parts: Vec<&str> = path.split(WILDCARD).collect();
    let mut projected: Option<Vec<Value>> = None;

    for (i, part) in parts.iter().enumerate() {
        let sub = parts
            .get(i + 1)
            .map(|p| trim_leading_dot(p))
            .filter(|p| !p.is_empty());
        if i == 0 {
            let base = trim_leading_dot(part);
            if let Some(base_value) = get_path(root, base) {
                projected = Some(project_elements(base_value, sub));
            }
        } else if let Some(sub_path) = sub {
            projected = projected.map(|cells| {
                cells
                    .into_iter()
                    .map(|cell| descend_first(cell, sub_path))
                    .collect()
            });
        }
    }

    projected.map(Value::Array)
}

fn project_elements(base: &Value, sub: Option<&str>) -> Vec<Value> {
    let elements: Vec<&Value> = match base {
        Value::Array(items) => items.iter().collect(),
        // a map-like base is projected to an array of its values
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    };
    elements
        .into_iter()
        .map(|element| match sub {
            Some(sub_path) => match get_path(element, sub_path) {
                Some(read) if is_truthy(read) => read.clone(),
                _ => Value::Null,
            },
            None => Value::Null,
        })
        .collect()
}

fn descend_first(cell: Value, sub_path: &str) -> Value {
    if !is_truthy(&cell) {
        return Value::Null;
    }
    match cell {
        Value::Array(items) => items
            .first()
            .and_then(|first| get_path(first, sub_path))
            .cloned()
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Write a value sequence through a wildcard path
///
/// With a single wildcard the base array is ensured (default `[]`) and each
/// non-null element lands at its own index; `null` elements are skipped,
/// leaving that index either absent or previously-set. With more than one
/// wildcard, index information is unrecoverable: every intermediate level
/// is ensured as an array and the entire value is written collapsed onto
/// index 0 at every wildcard level.
pub fn set_wildcard(root: &mut Value, path: &str, value: Value) -> WildcardWrite {
    let parts: Vec<&str> = path.split(WILDCARD).collect();

    if parts.len() > 2 {
        for i in 0..parts.len() {
            if parts.get(i + 1).map(|p| !p.is_empty()).unwrap_or(false) {
                let prefix = parts[..=i].join("[0]");
                if get_path(root, &prefix).is_none() {
                    set_path(root, &prefix, Value::Array(Vec::new()));
                }
            }
        }
        set_path(root, &parts.join("[0]"), value);
        return WildcardWrite::Collapsed;
    }

    if get_path(root, parts[0]).is_none() {
        set_path(root, parts[0], Value::Array(Vec::new()));
    }
    match value {
        Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                if !item.is_null() {
                    set_path(root, &parts.join(&format!("[{i}]")), item);
                }
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                if !item.is_null() {
                    set_path(root, &parts.join(&format!("[{key}]")), item);
                }
            }
        }
        _ => {}
    }
    WildcardWrite::Indexed
}

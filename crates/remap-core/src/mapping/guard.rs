//! Reversibility preconditions
//!
//! Two checks back the reversibility contract: a specification may only be
//! executed in reverse if it is declared reversible, and a reversible
//! specification may not read through a path whose wildcard structure the
//! single-wildcard-aware write path cannot invert.
//!
//! Copyright (c) 2025 Remap Team
//! Licensed under the MIT OR Apache-2.0 license

use crate::error::{Error, Result};
use crate::mapping::path;
use crate::types::{MapOptions, MappingSpec};

/// Fail fast when reverse execution is requested against a specification
/// not marked reversible
pub fn check_direction(spec: &MappingSpec, options: MapOptions) -> Result<()> {
    if options.reverse && !spec.is_reversible {
        return Err(Error::NotReversible {
            message: "attempting to reverse a non-reversible map".to_string(),
        });
    }
    Ok(())
}

/// Reject ambiguous multi-wildcard reads on reversible specifications
pub fn check_read_path(is_reversible: bool, read_path: &str) -> Result<()> {
    if is_reversible {
        let count = path::wildcard_count(read_path);
        if count > 1 {
            return Err(Error::AmbiguousWildcard {
                path: read_path.to_string(),
                count,
            });
        }
    }
    Ok(())
}

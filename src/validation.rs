//! Shape checks shared by every `from_json` loader.
//!
//! Each helper takes the location of the checked value so that errors point
//! at the offending part of the document.

use serde_json::{Map, Value};

use crate::Mw;
use crate::error::{ModelError, ModelResult};

/// Joins an object key onto a location.
pub(crate) fn key_path(path: &str, key: &str) -> String {
    format!("{path}.{key}")
}

/// Joins an array index onto a location.
pub(crate) fn index_path(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

pub(crate) fn ensure_object<'a>(j: &'a Value, path: &str) -> ModelResult<&'a Map<String, Value>> {
    j.as_object().ok_or_else(|| ModelError::shape(path, "an object"))
}

/// Ensures `j` is an object with exactly `size` keys.
pub(crate) fn ensure_object_with_size<'a>(
    j: &'a Value,
    size: usize,
    path: &str,
) -> ModelResult<&'a Map<String, Value>> {
    let obj = ensure_object(j, path)?;
    if obj.len() != size {
        return Err(ModelError::shape(
            path,
            format!("an object with {size} keys, found {}", obj.len()),
        ));
    }
    Ok(obj)
}

pub(crate) fn require_key<'a>(
    obj: &'a Map<String, Value>,
    key: &'static str,
    path: &str,
) -> ModelResult<&'a Value> {
    obj.get(key).ok_or_else(|| ModelError::MissingKey {
        path: path.to_string(),
        key,
    })
}

pub(crate) fn ensure_string<'a>(j: &'a Value, path: &str) -> ModelResult<&'a str> {
    j.as_str().ok_or_else(|| ModelError::shape(path, "a string"))
}

pub(crate) fn ensure_array<'a>(j: &'a Value, path: &str) -> ModelResult<&'a [Value]> {
    j.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ModelError::shape(path, "an array"))
}

pub(crate) fn ensure_array_size(values: &[Value], size: usize, path: &str) -> ModelResult<()> {
    if values.len() != size {
        return Err(ModelError::SizeMismatch {
            path: path.to_string(),
            expected: size,
            found: values.len(),
        });
    }
    Ok(())
}

/// Reads an array of numbers; integers are accepted as numbers.
pub(crate) fn array_of_numbers(j: &Value, path: &str) -> ModelResult<Vec<Mw>> {
    ensure_array(j, path)?
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64()
                .ok_or_else(|| ModelError::shape(&index_path(path, i), "a number"))
        })
        .collect()
}

/// Reads an array of numbers whose length must be exactly `size`.
pub(crate) fn array_of_numbers_with_size(
    j: &Value,
    size: usize,
    path: &str,
) -> ModelResult<Vec<Mw>> {
    ensure_array_size(ensure_array(j, path)?, size, path)?;
    array_of_numbers(j, path)
}

/// Reads an array of non-negative integers fitting in `u32`.
pub(crate) fn array_of_durations(j: &Value, path: &str) -> ModelResult<Vec<u32>> {
    ensure_array(j, path)?
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ModelError::shape(&index_path(path, i), "a non-negative integer"))
        })
        .collect()
}

/// Ensures an embedded zone identifier matches the resolved zone.
pub(crate) fn ensure_zone_identifiers_are_the_same(
    found: &str,
    expected: &str,
    path: &str,
) -> ModelResult<()> {
    if found != expected {
        return Err(ModelError::IdentifierMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

//! Composite key derivation.
//!
//! A composite key is the NUL namespace marker, the object type, and each
//! attribute, every part terminated by NUL:
//! `"\0bid\0auction-1\0tx-42\0"`. The leading NUL keeps composite keys out of
//! the namespace of plain identifiers, which may not contain NUL.

use crate::error::{StoreError, StoreResult};

const SEPARATOR: char = '\u{0}';

/// Build a composite key from an object type and its attributes.
///
/// Deterministic: the same parts always produce the same key, and distinct
/// part lists never collide because no part may contain the separator.
pub fn composite_key(object_type: &str, attributes: &[&str]) -> StoreResult<String> {
    if object_type.is_empty() {
        return Err(StoreError::InvalidKey("object type must not be empty".into()));
    }
    let mut key = String::with_capacity(
        2 + object_type.len() + attributes.iter().map(|a| a.len() + 1).sum::<usize>(),
    );
    key.push(SEPARATOR);
    for part in std::iter::once(&object_type).chain(attributes) {
        if part.contains(SEPARATOR) {
            return Err(StoreError::InvalidKey(format!("key part {part:?} contains NUL")));
        }
        key.push_str(part);
        key.push(SEPARATOR);
    }
    Ok(key)
}

/// Split a composite key back into its object type and attributes.
///
/// Returns `None` if `key` is not a composite key.
pub fn split_composite_key(key: &str) -> Option<(&str, Vec<&str>)> {
    let body = key.strip_prefix(SEPARATOR)?.strip_suffix(SEPARATOR)?;
    let mut parts = body.split(SEPARATOR);
    let object_type = parts.next().filter(|t| !t.is_empty())?;
    Some((object_type, parts.collect()))
}

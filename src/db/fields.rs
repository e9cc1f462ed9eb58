// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Field mappings passed in by the authentication layer.
//!
//! A mapping is a BSON document keyed by storage field names. Creating
//! deserializes the mapping into the typed document (unset fields take
//! their serde defaults). Updating overwrites each listed field on the
//! current value and rebuilds the typed document, so fields that are not
//! listed are never touched.

use bson::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Build a typed document from a field mapping.
pub fn build<T: DeserializeOwned>(fields: Document) -> Result<T> {
    Ok(bson::from_document(fields)?)
}

/// Overwrite `fields` on `value`, returning the updated value.
///
/// Fails without modifying anything if a value has the wrong type for
/// its field, or if a key names a field the document does not have.
pub fn apply_fields<T>(value: &T, fields: Document) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let before = bson::to_document(value)?;
    let keys: Vec<String> = fields.keys().cloned().collect();

    let mut current = before.clone();
    for (key, field_value) in fields {
        current.insert(key, field_value);
    }
    let updated: T = bson::from_document(current)?;

    // Keys serde ignored on the way back in are not fields of `T`.
    let after = bson::to_document(&updated)?;
    if let Some(key) = keys
        .iter()
        .find(|key| !before.contains_key(key.as_str()) && !after.contains_key(key.as_str()))
    {
        return Err(StoreError::Serialization(format!("unknown field {:?}", key)));
    }

    Ok(updated)
}

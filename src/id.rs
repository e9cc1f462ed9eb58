// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parsing external identifiers into primary keys.
//!
//! Identifiers arrive from URLs, token payloads and similar sources. Any
//! value that is not a valid key is reported as
//! [`StoreError::InvalidId`] regardless of why it failed, so callers can
//! answer with a uniform "bad request".

use bson::oid::ObjectId;
use bson::Bson;

use crate::error::{Result, StoreError};

/// Converts an external representation into a validated key.
pub trait ParseId {
    type Id;

    fn parse_id<V: Into<Bson>>(&self, value: V) -> Result<Self::Id>;
}

/// [`ParseId`] for `ObjectId` keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectIdParser;

impl ParseId for ObjectIdParser {
    type Id = ObjectId;

    fn parse_id<V: Into<Bson>>(&self, value: V) -> Result<ObjectId> {
        match value.into() {
            Bson::ObjectId(id) => Ok(id),
            Bson::String(s) => ObjectId::parse_str(&s)
                .map_err(|e| StoreError::InvalidId(format!("{:?}: {}", s, e))),
            Bson::Binary(binary) => <[u8; 12]>::try_from(binary.bytes.as_slice())
                .map(ObjectId::from_bytes)
                .map_err(|_| {
                    StoreError::InvalidId(format!(
                        "expected 12 bytes, got {}",
                        binary.bytes.len()
                    ))
                }),
            other => Err(StoreError::InvalidId(format!(
                "expected an ObjectId, hex string or 12 bytes, got {:?}",
                other.element_type()
            ))),
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (MongoDB).

pub mod fields;
pub mod mongo;

pub use fields::apply_fields;
pub use mongo::MongoDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACCESS_TOKENS: &str = "access_tokens";
}

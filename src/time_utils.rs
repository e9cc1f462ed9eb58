// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC time at the millisecond precision BSON datetimes store.
///
/// Using this for defaults keeps a freshly built document equal to the
/// copy read back from the database.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

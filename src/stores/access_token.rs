// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MongoDB access token store.

use std::marker::PhantomData;

use bson::{doc, Document};
use chrono::{DateTime, Duration, SubsecRound, Utc};

use super::AccessTokenDatabase;
use crate::db::fields::{apply_fields, build};
use crate::db::MongoDb;
use crate::error::Result;
use crate::models::{AccessToken, Model};

/// Earliest stored (millisecond) timestamp not before `max_age`.
fn cutoff(max_age: DateTime<Utc>) -> bson::DateTime {
    let truncated = max_age.trunc_subsecs(3);
    if truncated < max_age {
        bson::DateTime::from_chrono(truncated + Duration::milliseconds(1))
    } else {
        bson::DateTime::from_chrono(truncated)
    }
}

/// Filter for a token value, optionally excluding tokens created before
/// `max_age`.
fn token_filter(token: &str, max_age: Option<DateTime<Utc>>) -> Document {
    let mut filter = doc! { "token": token };
    if let Some(max_age) = max_age {
        filter.insert("created_at", doc! { "$gte": cutoff(max_age) });
    }
    filter
}

/// Access token store backed by a MongoDB collection.
///
/// `A` must store its creation time as a BSON datetime under
/// `created_at`, as [`AccessToken`] does.
pub struct AccessTokenStore<A = AccessToken> {
    db: MongoDb,
    _model: PhantomData<fn() -> A>,
}

impl<A> Clone for AccessTokenStore<A> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _model: PhantomData,
        }
    }
}

impl<A> AccessTokenStore<A> {
    pub fn new(db: MongoDb) -> Self {
        Self {
            db,
            _model: PhantomData,
        }
    }
}

impl<A: Model> AccessTokenDatabase for AccessTokenStore<A> {
    type AccessToken = A;

    async fn get_by_token(&self, token: &str, max_age: Option<DateTime<Utc>>) -> Result<Option<A>> {
        self.db.find_one(token_filter(token, max_age), None).await
    }

    async fn create(&self, fields: Document) -> Result<A> {
        let mut access_token: A = build(fields)?;
        self.db.insert(&mut access_token).await?;
        tracing::debug!(id = ?access_token.id(), "Created access token");
        Ok(access_token)
    }

    async fn update(&self, access_token: A, fields: Document) -> Result<A> {
        let access_token = apply_fields(&access_token, fields)?;
        self.db.save(&access_token).await?;
        Ok(access_token)
    }

    async fn delete(&self, access_token: &A) -> Result<()> {
        self.db.remove(access_token).await?;
        tracing::debug!(id = ?access_token.id(), "Deleted access token");
        Ok(())
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Access token document for database-backed sessions.

use bson::doc;
use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::Model;
use crate::db::collections;
use crate::time_utils::utc_now;

/// Session access token owned by a user.
///
/// `ID` is the owning user's key type. `created_at` is stored as a BSON
/// datetime so expiry cutoffs compare chronologically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken<ID = ObjectId> {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Opaque token value (unique)
    pub token: String,
    /// Owning user's id
    pub user_id: ID,
    /// When the token was issued
    #[serde(with = "chrono_datetime_as_bson_datetime", default = "utc_now")]
    pub created_at: DateTime<Utc>,
}

impl<ID> Model for AccessToken<ID>
where
    ID: Serialize + DeserializeOwned + Send + Sync + Unpin,
{
    type Id = ObjectId;

    const COLLECTION: &'static str = collections::ACCESS_TOKENS;

    fn id(&self) -> Option<&ObjectId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn indexes() -> Vec<IndexModel> {
        vec![IndexModel::builder()
            .keys(doc! { "token": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build()]
    }
}

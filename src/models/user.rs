// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User document and its email indexes.

use bson::doc;
use bson::oid::ObjectId;
use mongodb::options::{Collation, CollationStrength, IndexOptions};
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

use super::oauth::{OAuthAccount, OAuthAccounts};
use super::Model;
use crate::db::collections;

/// Name of the collation-aware unique email index.
pub const EMAIL_INDEX_NAME: &str = "case_insensitive_email_index";

/// Collation used for email uniqueness and lookups.
///
/// Strength 2 compares base letters and diacritics but ignores case, so
/// `Lancelot@camelot.bt` equals `lancelot@camelot.bt` while `é` and `e`
/// stay distinct.
pub fn email_collation() -> Collation {
    Collation::builder()
        .locale("en")
        .strength(CollationStrength::Secondary)
        .build()
}

/// Indexes enforcing email uniqueness.
///
/// Custom user models should return these from [`Model::indexes`].
pub fn user_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
        IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name(EMAIL_INDEX_NAME.to_string())
                    .collation(email_collation())
                    .unique(true)
                    .build(),
            )
            .build(),
    ]
}

fn default_true() -> bool {
    true
}

/// User account stored in MongoDB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Email address, stored as given
    pub email: String,
    pub hashed_password: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_verified: bool,
    /// Linked OAuth accounts (only populated by OAuth-enabled stores)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oauth_accounts: Vec<OAuthAccount>,
}

impl Model for User {
    type Id = ObjectId;

    const COLLECTION: &'static str = collections::USERS;

    fn id(&self) -> Option<&ObjectId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn indexes() -> Vec<IndexModel> {
        user_indexes()
    }
}

impl OAuthAccounts<OAuthAccount> for User {
    fn oauth_accounts(&self) -> &[OAuthAccount] {
        &self.oauth_accounts
    }

    fn oauth_accounts_mut(&mut self) -> Option<&mut Vec<OAuthAccount>> {
        Some(&mut self.oauth_accounts)
    }
}

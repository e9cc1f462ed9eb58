// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OAuth accounts embedded in user documents.

use bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Model;

/// Name of the user field holding linked OAuth accounts.
pub const OAUTH_ACCOUNTS_FIELD: &str = "oauth_accounts";

/// An OAuth account type that can be embedded in a user document.
///
/// Accounts are identified by `(oauth_name, account_id)`; any other id
/// the type carries is never used for matching.
pub trait OAuthAccountModel: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Whether stores configured with this type support OAuth operations.
    const ENABLED: bool = true;

    fn oauth_name(&self) -> &str;

    fn account_id(&self) -> &str;

    /// Whether `self` and `other` refer to the same provider account.
    fn same_account<O: OAuthAccountModel>(&self, other: &O) -> bool {
        self.oauth_name() == other.oauth_name() && self.account_id() == other.account_id()
    }
}

/// Access to the OAuth accounts list of a user document.
///
/// The list must be stored under [`OAUTH_ACCOUNTS_FIELD`].
pub trait OAuthAccounts<O> {
    /// Linked accounts in insertion order.
    fn oauth_accounts(&self) -> &[O];

    /// `None` when the document has no OAuth list.
    fn oauth_accounts_mut(&mut self) -> Option<&mut Vec<O>>;
}

/// OAuth account type of a store configured without OAuth support.
///
/// The type has no values, so a list of it is always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOAuthAccount {}

impl OAuthAccountModel for NoOAuthAccount {
    const ENABLED: bool = false;

    fn oauth_name(&self) -> &str {
        match *self {}
    }

    fn account_id(&self) -> &str {
        match *self {}
    }
}

impl Serialize for NoOAuthAccount {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        match *self {}
    }
}

impl<'de> Deserialize<'de> for NoOAuthAccount {
    fn deserialize<D: Deserializer<'de>>(_deserializer: D) -> Result<Self, D::Error> {
        Err(serde::de::Error::custom("OAuth accounts are not configured"))
    }
}

impl<U: Model> OAuthAccounts<NoOAuthAccount> for U {
    fn oauth_accounts(&self) -> &[NoOAuthAccount] {
        &[]
    }

    fn oauth_accounts_mut(&mut self) -> Option<&mut Vec<NoOAuthAccount>> {
        None
    }
}

/// OAuth account linked to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthAccount {
    /// Sub-record id, generated when the account is created
    #[serde(default = "ObjectId::new")]
    pub id: ObjectId,
    /// Provider name (e.g. "google")
    pub oauth_name: String,
    /// Provider access token
    pub access_token: String,
    /// Account id on the provider side
    pub account_id: String,
    /// Account email on the provider side
    pub account_email: String,
    /// Access token expiry (epoch seconds)
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl OAuthAccountModel for OAuthAccount {
    fn oauth_name(&self) -> &str {
        &self.oauth_name
    }

    fn account_id(&self) -> &str {
        &self.account_id
    }
}

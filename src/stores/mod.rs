// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store interfaces consumed by the authentication layer, and their
//! MongoDB implementations.
//!
//! Every operation issues a single request. Absent documents are `None`,
//! never an error, and no operation retries.

pub mod access_token;
pub mod user;

pub use access_token::AccessTokenStore;
pub use user::UserStore;

use bson::Document;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Model, OAuthAccountModel};

/// User persistence.
///
/// Field mappings are keyed by storage field names; see
/// [`crate::db::fields`].
pub trait UserDatabase: Send + Sync {
    type User: Model;
    /// Account type stored in the user's OAuth list.
    type OAuthAccount: OAuthAccountModel;

    /// Get a single user by id.
    async fn get(&self, id: &<Self::User as Model>::Id) -> Result<Option<Self::User>>;

    /// Get a single user by email, ignoring case.
    async fn get_by_email(&self, email: &str) -> Result<Option<Self::User>>;

    /// Get a single user by linked OAuth account.
    ///
    /// # Errors
    ///
    /// `StoreError::Unsupported` if the store has no OAuth account type.
    async fn get_by_oauth_account(
        &self,
        oauth_name: &str,
        account_id: &str,
    ) -> Result<Option<Self::User>>;

    /// Create a user.
    ///
    /// # Errors
    ///
    /// `StoreError::DuplicateKey` if the email is already registered.
    async fn create(&self, fields: Document) -> Result<Self::User>;

    /// Overwrite `fields` on `user` and save it.
    async fn update(&self, user: Self::User, fields: Document) -> Result<Self::User>;

    /// Delete a user.
    async fn delete(&self, user: &Self::User) -> Result<()>;

    /// Link a new OAuth account to `user`.
    ///
    /// # Errors
    ///
    /// `StoreError::Unsupported` if the store has no OAuth account type.
    async fn add_oauth_account(&self, user: Self::User, fields: Document) -> Result<Self::User>;

    /// Overwrite `fields` on the linked account matching `oauth_account`.
    ///
    /// Accounts match on provider name and provider account id only, so
    /// any account-shaped value identifies the entry. If none matches, the
    /// user is saved unchanged.
    ///
    /// # Errors
    ///
    /// `StoreError::Unsupported` if the store has no OAuth account type.
    async fn update_oauth_account<A: OAuthAccountModel>(
        &self,
        user: Self::User,
        oauth_account: &A,
        fields: Document,
    ) -> Result<Self::User>;
}

/// Access token persistence.
pub trait AccessTokenDatabase: Send + Sync {
    type AccessToken;

    /// Get a token by value.
    ///
    /// With `max_age`, tokens created before that instant are treated as
    /// expired and not returned.
    async fn get_by_token(
        &self,
        token: &str,
        max_age: Option<DateTime<Utc>>,
    ) -> Result<Option<Self::AccessToken>>;

    /// Create a token.
    ///
    /// # Errors
    ///
    /// `StoreError::DuplicateKey` if the token value already exists.
    async fn create(&self, fields: Document) -> Result<Self::AccessToken>;

    /// Overwrite `fields` on `access_token` and save it.
    async fn update(
        &self,
        access_token: Self::AccessToken,
        fields: Document,
    ) -> Result<Self::AccessToken>;

    /// Delete a token.
    async fn delete(&self, access_token: &Self::AccessToken) -> Result<()>;
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Document models and the schema they declare.

pub mod access_token;
pub mod oauth;
pub mod user;

pub use access_token::AccessToken;
pub use oauth::{NoOAuthAccount, OAuthAccount, OAuthAccountModel, OAuthAccounts};
pub use user::User;

use mongodb::IndexModel;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A document type stored in its own collection.
///
/// The primary key is serialized under `_id`. It is `None` until the
/// document has been inserted and the store has recorded the key the
/// driver generated.
pub trait Model: Serialize + DeserializeOwned + Send + Sync + Unpin {
    /// Primary key type.
    type Id: Serialize + DeserializeOwned + Clone + PartialEq + Debug + Send + Sync;

    /// Collection name.
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&Self::Id>;

    fn set_id(&mut self, id: Self::Id);

    /// Indexes created by [`MongoDb::init_model`](crate::db::MongoDb::init_model).
    fn indexes() -> Vec<IndexModel> {
        Vec::new()
    }
}

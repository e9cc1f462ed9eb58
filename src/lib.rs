// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! MongoDB persistence for user accounts, linked OAuth accounts and
//! session access tokens.
//!
//! The authentication layer talks to the [`UserDatabase`] and
//! [`AccessTokenDatabase`] traits; [`UserStore`] and [`AccessTokenStore`]
//! implement them on top of the official MongoDB driver.
//!
//! ```no_run
//! use bson::doc;
//! use users_db_mongo::{Config, MongoDb, User, UserDatabase, UserStore};
//!
//! # async fn example() -> users_db_mongo::Result<()> {
//! let db = MongoDb::connect(&Config::default()).await?;
//! db.init_model::<User>().await?;
//!
//! let users: UserStore<User> = UserStore::new(db);
//! let user = users
//!     .create(doc! { "email": "lancelot@camelot.bt", "hashed_password": "..." })
//!     .await?;
//! let found = users.get_by_email("Lancelot@camelot.bt").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod id;
pub mod models;
pub mod stores;
pub mod time_utils;

pub use config::Config;
pub use db::MongoDb;
pub use error::{Result, StoreError};
pub use id::{ObjectIdParser, ParseId};
pub use models::{
    AccessToken, Model, NoOAuthAccount, OAuthAccount, OAuthAccountModel, OAuthAccounts, User,
};
pub use stores::{AccessTokenDatabase, AccessTokenStore, UserDatabase, UserStore};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

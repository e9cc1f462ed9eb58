// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MongoDB user store.

use std::marker::PhantomData;

use bson::oid::ObjectId;
use bson::{doc, Bson, Document};

use super::UserDatabase;
use crate::db::fields::{apply_fields, build};
use crate::db::mongo::key_filter;
use crate::db::MongoDb;
use crate::error::{Result, StoreError};
use crate::id::{ObjectIdParser, ParseId};
use crate::models::oauth::OAUTH_ACCOUNTS_FIELD;
use crate::models::user::email_collation;
use crate::models::{Model, NoOAuthAccount, OAuthAccountModel, OAuthAccounts};

/// User store backed by a MongoDB collection.
///
/// `U` is the user document type. `O` is the embedded OAuth account
/// type; with the default [`NoOAuthAccount`] every OAuth operation fails
/// with [`StoreError::Unsupported`].
///
/// ```no_run
/// use users_db_mongo::{MongoDb, OAuthAccount, User, UserStore};
///
/// # fn example(db: MongoDb) {
/// let users: UserStore<User> = UserStore::new(db.clone());
/// let users_with_oauth: UserStore<User, OAuthAccount> = UserStore::new(db);
/// # }
/// ```
pub struct UserStore<U, O = NoOAuthAccount> {
    db: MongoDb,
    _models: PhantomData<fn() -> (U, O)>,
}

impl<U, O> Clone for UserStore<U, O> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _models: PhantomData,
        }
    }
}

impl<U, O> UserStore<U, O> {
    pub fn new(db: MongoDb) -> Self {
        Self {
            db,
            _models: PhantomData,
        }
    }
}

impl<U, O> UserStore<U, O>
where
    U: Model + OAuthAccounts<O>,
    O: OAuthAccountModel,
{
    fn ensure_oauth() -> Result<()> {
        if O::ENABLED {
            Ok(())
        } else {
            Err(StoreError::Unsupported(StoreError::OAUTH_NOT_CONFIGURED))
        }
    }
}

/// Overwrite `fields` on every account matching `existing`.
///
/// Returns the number of accounts updated.
fn update_matching_accounts<O, A>(accounts: &mut [O], existing: &A, fields: &Document) -> Result<usize>
where
    O: OAuthAccountModel,
    A: OAuthAccountModel,
{
    let mut updated = 0;
    for account in accounts.iter_mut() {
        if account.same_account(existing) {
            *account = apply_fields(&*account, fields.clone())?;
            updated += 1;
        }
    }
    Ok(updated)
}

impl<U, O> UserDatabase for UserStore<U, O>
where
    U: Model + OAuthAccounts<O>,
    O: OAuthAccountModel,
{
    type User = U;
    type OAuthAccount = O;

    async fn get(&self, id: &U::Id) -> Result<Option<U>> {
        self.db.find_one(key_filter(id)?, None).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<U>> {
        self.db
            .find_one(doc! { "email": email }, Some(email_collation()))
            .await
    }

    async fn get_by_oauth_account(&self, oauth_name: &str, account_id: &str) -> Result<Option<U>> {
        Self::ensure_oauth()?;

        let filter = doc! {
            OAUTH_ACCOUNTS_FIELD: {
                "$elemMatch": { "oauth_name": oauth_name, "account_id": account_id }
            }
        };
        self.db.find_one(filter, None).await
    }

    async fn create(&self, fields: Document) -> Result<U> {
        let mut user: U = build(fields)?;
        self.db.insert(&mut user).await?;
        tracing::debug!(id = ?user.id(), "Created user");
        Ok(user)
    }

    async fn update(&self, user: U, fields: Document) -> Result<U> {
        let user = apply_fields(&user, fields)?;
        self.db.save(&user).await?;
        Ok(user)
    }

    async fn delete(&self, user: &U) -> Result<()> {
        self.db.remove(user).await?;
        tracing::debug!(id = ?user.id(), "Deleted user");
        Ok(())
    }

    async fn add_oauth_account(&self, mut user: U, fields: Document) -> Result<U> {
        Self::ensure_oauth()?;

        let account: O = build(fields)?;
        let oauth_name = account.oauth_name().to_string();
        user.oauth_accounts_mut()
            .ok_or(StoreError::Unsupported(StoreError::OAUTH_NOT_CONFIGURED))?
            .push(account);

        self.db.save(&user).await?;
        tracing::debug!(id = ?user.id(), oauth_name = %oauth_name, "Linked OAuth account");
        Ok(user)
    }

    async fn update_oauth_account<A: OAuthAccountModel>(
        &self,
        mut user: U,
        oauth_account: &A,
        fields: Document,
    ) -> Result<U> {
        Self::ensure_oauth()?;

        let accounts = user
            .oauth_accounts_mut()
            .ok_or(StoreError::Unsupported(StoreError::OAUTH_NOT_CONFIGURED))?;
        let updated = update_matching_accounts(accounts, oauth_account, &fields)?;
        if updated == 0 {
            tracing::debug!(
                id = ?user.id(),
                oauth_name = oauth_account.oauth_name(),
                "No linked OAuth account matched, saving user unchanged"
            );
        }

        self.db.save(&user).await?;
        Ok(user)
    }
}

impl<U, O> ParseId for UserStore<U, O>
where
    U: Model<Id = ObjectId>,
{
    type Id = ObjectId;

    fn parse_id<V: Into<Bson>>(&self, value: V) -> Result<ObjectId> {
        ObjectIdParser.parse_id(value)
    }
}

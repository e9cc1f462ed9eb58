// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MongoDB client wrapper.
//!
//! Owns the database handle shared by the stores and provides:
//! - Connection from [`Config`]
//! - An offline mode for tests that never reach the server
//! - Index initialisation for document models

use bson::{doc, Document};
use mongodb::options::{ClientOptions, Collation, FindOneOptions};
use mongodb::{Client, Collection, Database};
use serde::Serialize;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::models::Model;

/// MongoDB database handle.
#[derive(Clone, Debug)]
pub struct MongoDb {
    database: Option<Database>,
}

impl MongoDb {
    /// Connect using the given configuration.
    ///
    /// The server is pinged once so an unreachable deployment is reported
    /// here rather than on the first store operation.
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut options = ClientOptions::parse(config.mongodb_uri.as_str())
            .await
            .map_err(|e| StoreError::Database(format!("Invalid MongoDB URI: {}", e)))?;
        options.server_selection_timeout = Some(config.server_selection_timeout);
        if let Some(app_name) = &config.app_name {
            options.app_name = Some(app_name.clone());
        }

        let client = Client::with_options(options)
            .map_err(|e| StoreError::Database(format!("Failed to create MongoDB client: {}", e)))?;

        let db = Self::from_database(client.database(&config.database));
        db.ping().await?;

        tracing::info!(database = %config.database, "Connected to MongoDB");

        Ok(db)
    }

    /// Wrap an existing database handle.
    pub fn from_database(database: Database) -> Self {
        Self {
            database: Some(database),
        }
    }

    /// Create a mock handle for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { database: None }
    }

    /// The underlying database, or `None` in offline mode.
    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    /// Helper to get the database or return an error if offline.
    fn get_database(&self) -> Result<&Database> {
        self.database
            .as_ref()
            .ok_or_else(|| StoreError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Typed collection for a document model.
    pub(crate) fn collection<M: Model>(&self) -> Result<Collection<M>> {
        Ok(self.get_database()?.collection::<M>(M::COLLECTION))
    }

    /// Check that the server is reachable.
    pub async fn ping(&self) -> Result<()> {
        self.get_database()?.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Create the indexes a model declares.
    ///
    /// Must run before the model's uniqueness guarantees hold. Creating an
    /// index that already exists with the same options is a no-op.
    pub async fn init_model<M: Model>(&self) -> Result<()> {
        let indexes = M::indexes();
        if indexes.is_empty() {
            return Ok(());
        }

        let count = indexes.len();
        self.collection::<M>()?.create_indexes(indexes).await?;

        tracing::info!(
            collection = M::COLLECTION,
            count,
            "Indexes initialized"
        );
        Ok(())
    }

    // ─── Document Operations ─────────────────────────────────────

    /// Find the first document of `M` matching `filter`.
    pub(crate) async fn find_one<M: Model>(
        &self,
        filter: Document,
        collation: Option<Collation>,
    ) -> Result<Option<M>> {
        let mut options = FindOneOptions::default();
        options.collation = collation;
        Ok(self
            .collection::<M>()?
            .find_one(filter)
            .with_options(options)
            .await?)
    }

    /// Insert a new document and record the key the driver assigned.
    pub(crate) async fn insert<M: Model>(&self, document: &mut M) -> Result<()> {
        let result = self.collection::<M>()?.insert_one(&*document).await?;
        document.set_id(bson::from_bson(result.inserted_id)?);
        Ok(())
    }

    /// Replace the stored copy of a document with its full current state.
    ///
    /// Like a document `save`, the write is an upsert.
    pub(crate) async fn save<M: Model>(&self, document: &M) -> Result<()> {
        let filter = id_filter(document)?;
        self.collection::<M>()?
            .replace_one(filter, document)
            .upsert(true)
            .await?;
        Ok(())
    }

    /// Delete a document by key.
    pub(crate) async fn remove<M: Model>(&self, document: &M) -> Result<()> {
        let filter = id_filter(document)?;
        self.collection::<M>()?.delete_one(filter).await?;
        Ok(())
    }

    /// Drop the whole database.
    pub async fn drop_database(&self) -> Result<()> {
        let database = self.get_database()?;
        database.drop().await?;
        tracing::debug!(database = database.name(), "Dropped database");
        Ok(())
    }
}

/// Filter selecting a persisted document by key.
pub(crate) fn key_filter<K: Serialize>(id: &K) -> Result<Document> {
    Ok(doc! { "_id": bson::to_bson(id)? })
}

fn id_filter<M: Model>(document: &M) -> Result<Document> {
    key_filter(document.id().ok_or(StoreError::NotPersisted)?)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use users_db_mongo::{Config, MongoDb};

/// Check if a MongoDB server is configured via environment variable.
#[allow(dead_code)]
pub fn mongodb_available() -> bool {
    std::env::var("MONGODB_URI").is_ok()
}

/// Skip test with message if MongoDB is not available.
#[macro_export]
macro_rules! require_mongodb {
    () => {
        if !crate::common::mongodb_available() {
            eprintln!("⚠️  Skipping: MONGODB_URI not set");
            return;
        }
    };
}

/// Install a log subscriber once per test binary (`RUST_LOG` controls output).
#[allow(dead_code)]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Generate a unique suffix for test isolation.
#[allow(dead_code)]
pub fn unique_suffix() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64
}

/// Connect to a fresh, uniquely named database.
///
/// Callers drop it with `MongoDb::drop_database` when done.
#[allow(dead_code)]
pub async fn test_db() -> MongoDb {
    init_logging();

    let mut config = Config::from_env().expect("Failed to load MongoDB config");
    config.database = format!("users_db_test_{}", unique_suffix());

    MongoDb::connect(&config)
        .await
        .expect("Failed to connect to MongoDB")
}

/// Create an offline database handle.
#[allow(dead_code)]
pub fn test_db_offline() -> MongoDb {
    MongoDb::new_mock()
}

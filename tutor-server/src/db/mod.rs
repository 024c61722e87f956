//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) — connection setup and schema.

pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::{AppError, AppResult};

const NAMESPACE: &str = "tutor";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database under `work_dir` and apply the
    /// schema definitions.
    pub async fn open(work_dir: &str) -> AppResult<Self> {
        let path = Path::new(work_dir).join("data");
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::attach(db).await
    }

    /// Select namespace/database and apply schema on an already-created handle.
    ///
    /// Tests use this with a RocksDB instance in a tempdir.
    pub async fn attach(db: Surreal<Db>) -> AppResult<Self> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        schema::define(&db).await?;
        tracing::info!("Database ready (SurrealDB RocksDB engine)");

        Ok(Self { db })
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

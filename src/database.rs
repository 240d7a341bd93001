use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::error::Result;
use crate::models::{AccountSnapshot, CodeArtifact, QuotaSnapshot, User};
use crate::utils::files::Collection;

/// Façade over the document store: three blob collections addressed by
/// filename, plus the mirrored user records. Filenames are the sole key;
/// duplicate uploads within a collection are unguarded and lookups return
/// the most recent row.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Builds the pool without touching the network; `ensure_connected`
    /// performs the actual startup handshake.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect_lazy(database_url)?;

        Ok(Database { pool })
    }

    /// Explicit startup connectivity check with a bounded retry loop.
    pub async fn ensure_connected(&self, attempts: u32, delay: Duration) -> Result<()> {
        for attempt in 1..=attempts {
            match sqlx::query("SELECT 1").execute(&self.pool).await {
                Ok(_) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        "database not reachable (attempt {}/{}): {}",
                        attempt,
                        attempts,
                        e
                    );
                    if attempt == attempts {
                        return Err(e.into());
                    }
                    tokio::time::sleep(delay).await;
                }
            }
        }
        Ok(())
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // Blob operations

    pub async fn put_blob(
        &self,
        collection: Collection,
        filename: &str,
        data: &[u8],
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO blobs (collection, filename, data, uploaded_at) VALUES ($1, $2, $3, NOW())",
        )
        .bind(collection.name())
        .bind(filename)
        .bind(data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_blob(
        &self,
        collection: Collection,
        filename: &str,
    ) -> Result<Option<Vec<u8>>> {
        let data = sqlx::query_scalar::<_, Vec<u8>>(
            "SELECT data FROM blobs WHERE collection = $1 AND filename = $2 \
             ORDER BY uploaded_at DESC LIMIT 1",
        )
        .bind(collection.name())
        .bind(filename)
        .fetch_optional(&self.pool)
        .await?;

        Ok(data)
    }

    // Code artifact operations. Append-only; no update or delete path.

    pub async fn save_code(&self, artifact: &CodeArtifact) -> Result<()> {
        sqlx::query(
            "INSERT INTO code_artifacts (id, filename, language, source, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(artifact.id)
        .bind(&artifact.filename)
        .bind(&artifact.language)
        .bind(&artifact.source)
        .bind(artifact.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_code(&self, filename: &str) -> Result<Option<String>> {
        let source = sqlx::query_scalar::<_, String>(
            "SELECT source FROM code_artifacts WHERE filename = $1 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(filename)
        .fetch_optional(&self.pool)
        .await?;

        Ok(source)
    }

    // User operations, driven by the webhook ingestor.

    pub async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, created_at, updated_at, is_verified, \
             quota_usage, quota_usage_percent, is_quota_exceeded, quota_interval, quota_limit \
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn create_user(&self, snapshot: &AccountSnapshot) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, email, password, created_at, updated_at, is_verified) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET \
               email = EXCLUDED.email, password = EXCLUDED.password, \
               created_at = EXCLUDED.created_at, updated_at = EXCLUDED.updated_at, \
               is_verified = EXCLUDED.is_verified",
        )
        .bind(&snapshot.id)
        .bind(&snapshot.auth.email)
        .bind(snapshot.password())
        .bind(snapshot.created_at())
        .bind(snapshot.updated_at())
        .bind(snapshot.verified())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites the full account snapshot. The caller decides whether
    /// anything actually changed; this always writes.
    pub async fn update_user(&self, snapshot: &AccountSnapshot) -> Result<()> {
        sqlx::query(
            "UPDATE users SET email = $2, password = $3, created_at = $4, \
             updated_at = $5, is_verified = $6 WHERE id = $1",
        )
        .bind(&snapshot.id)
        .bind(&snapshot.auth.email)
        .bind(snapshot.password())
        .bind(snapshot.created_at())
        .bind(snapshot.updated_at())
        .bind(snapshot.verified())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites only the quota snapshot, leaving account fields alone.
    pub async fn update_user_quota(&self, user_id: &str, quota: &QuotaSnapshot) -> Result<()> {
        sqlx::query(
            "UPDATE users SET quota_usage = $2, quota_usage_percent = $3, \
             is_quota_exceeded = $4, quota_interval = $5, quota_limit = $6 WHERE id = $1",
        )
        .bind(user_id)
        .bind(quota.quota_usage)
        .bind(quota.quota_usage_percent)
        .bind(quota.is_quota_exceeded)
        .bind(quota.quota_interval.as_deref())
        .bind(quota.quota_limit)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A saved source file. Immutable once stored; retrieved by filename.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CodeArtifact {
    pub id: Uuid,
    pub filename: String,
    pub language: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl CodeArtifact {
    /// Language is inferred from the filename's extension.
    pub fn new(filename: String, source: String) -> Self {
        let language = crate::utils::files::language_from_filename(&filename);
        CodeArtifact {
            id: Uuid::new_v4(),
            filename,
            language,
            source,
            created_at: Utc::now(),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mirror of the identity provider's account state. Created by the `create`
/// webhook, overwritten wholesale by `update`, quota fields overwritten
/// independently by `quota`. There is no deletion path.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_verified: bool,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub quota: QuotaSnapshot,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    pub quota_usage: Option<i64>,
    pub quota_usage_percent: Option<f64>,
    pub is_quota_exceeded: Option<bool>,
    pub quota_interval: Option<String>,
    pub quota_limit: Option<i64>,
}

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Account payload delivered by the identity provider. `create` events carry
/// one snapshot; `update` events carry a before/after pair. The verification
/// flag lives inside `auth` on create payloads and at the top level on
/// update payloads, so both spots are read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub id: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    #[serde(default)]
    pub is_verified: Option<bool>,
    pub auth: AuthInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfo {
    pub email: String,
    #[serde(default)]
    pub has_password: bool,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
}

impl AccountSnapshot {
    /// The password only counts when the provider says one is set.
    pub fn password(&self) -> Option<&str> {
        if self.auth.has_password {
            self.auth.password.as_deref()
        } else {
            None
        }
    }

    pub fn verified(&self) -> bool {
        self.is_verified
            .or(self.auth.is_verified)
            .unwrap_or(false)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at_ms)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.updated_at_ms)
    }

    /// Field-wise inequality across email, id, password, both timestamps and
    /// the verification flag. Drives the update path's write-only-on-change
    /// behavior.
    pub fn differs_from(&self, other: &AccountSnapshot) -> bool {
        self.auth.email != other.auth.email
            || self.id != other.id
            || self.password() != other.password()
            || self.created_at_ms != other.created_at_ms
            || self.updated_at_ms != other.updated_at_ms
            || self.verified() != other.verified()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEvent {
    pub before: AccountSnapshot,
    pub after: AccountSnapshot,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaEvent {
    pub member: Member,
    pub quota_info: QuotaInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaInfo {
    pub current_usage_count: i64,
    pub current_usage_percentage: f64,
    pub is_quota_exceeded: bool,
    pub quota_interval: String,
    pub quota_limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(email: &str, verified: bool) -> AccountSnapshot {
        AccountSnapshot {
            id: "user_1".to_string(),
            created_at_ms: 1_688_400_000_000,
            updated_at_ms: 1_688_400_000_000,
            is_verified: Some(verified),
            auth: AuthInfo {
                email: email.to_string(),
                has_password: false,
                password: None,
                is_verified: None,
            },
        }
    }

    #[test]
    fn identical_snapshots_do_not_differ() {
        let a = snapshot("a@example.com", true);
        let b = a.clone();
        assert!(!a.differs_from(&b));
    }

    #[test]
    fn single_field_change_is_detected() {
        let a = snapshot("a@example.com", true);

        let mut changed = a.clone();
        changed.auth.email = "b@example.com".to_string();
        assert!(a.differs_from(&changed));

        let mut changed = a.clone();
        changed.updated_at_ms += 1;
        assert!(a.differs_from(&changed));

        let mut changed = a.clone();
        changed.is_verified = Some(false);
        assert!(a.differs_from(&changed));
    }

    #[test]
    fn password_ignored_unless_provider_says_set() {
        let mut a = snapshot("a@example.com", true);
        a.auth.password = Some("secret".to_string());
        let b = snapshot("a@example.com", true);
        // has_password is false on both sides, so the stray value is ignored.
        assert!(!a.differs_from(&b));

        a.auth.has_password = true;
        assert!(a.differs_from(&b));
    }

    #[test]
    fn verification_flag_read_from_auth_on_create_payloads() {
        let mut a = snapshot("a@example.com", true);
        a.is_verified = None;
        a.auth.is_verified = Some(true);
        assert!(a.verified());
    }

    #[test]
    fn millisecond_timestamps_convert_to_utc() {
        let a = snapshot("a@example.com", true);
        let created = a.created_at().unwrap();
        assert_eq!(created.timestamp_millis(), 1_688_400_000_000);
    }

    #[test]
    fn provider_payload_shape_deserializes() {
        let payload = serde_json::json!({
            "id": "user_9",
            "createdAtMs": 1_688_400_000_000i64,
            "updatedAtMs": 1_688_400_100_000i64,
            "auth": {
                "email": "u@example.com",
                "hasPassword": true,
                "password": "pw",
                "isVerified": true
            }
        });
        let snapshot: AccountSnapshot = serde_json::from_value(payload).unwrap();
        assert_eq!(snapshot.password(), Some("pw"));
        assert!(snapshot.verified());
    }

    #[test]
    fn quota_payload_shape_deserializes() {
        let payload = serde_json::json!({
            "member": { "id": "user_9" },
            "quotaInfo": {
                "currentUsageCount": 12,
                "currentUsagePercentage": 24.0,
                "isQuotaExceeded": false,
                "quotaInterval": "month",
                "quotaLimit": 50
            }
        });
        let event: QuotaEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(event.member.id, "user_9");
        assert_eq!(event.quota_info.quota_limit, 50);
    }
}

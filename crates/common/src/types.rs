use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery channel for outbound notifications.
///
/// Email is the only channel today; the enum stays open so additional
/// channels (SMS, push) can be added without widening call-site contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Email,
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelType::Email => write!(f, "email"),
        }
    }
}

/// Outcome of a dispatch attempt.
///
/// There is no pending state: a notification record only exists after an
/// attempt has completed one way or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Succeeded,
    Failed,
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationStatus::Succeeded => write!(f, "succeeded"),
            NotificationStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Per-user record controlling whether and where notifications are delivered.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NotificationPreference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub channel: ChannelType,
    pub enabled: bool,
    pub contact_info: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single dispatch attempt and its recorded outcome.
///
/// Retries mutate `status` in place on the same record; `created_at` is set
/// once at the first attempt and never changes. `deleted` is a soft-delete
/// flag: the record is kept for audit but excluded from history and from
/// retry candidacy.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub body: String,
    pub channel: ChannelType,
    pub status: NotificationStatus,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

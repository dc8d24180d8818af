//! Wire projections of the internal entities.
//!
//! Responses omit internal-only fields: timestamps on preferences, and the
//! body and soft-delete flag on notifications.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use courier_common::types::{
    ChannelType, Notification, NotificationPreference, NotificationStatus,
};

#[derive(Debug, Serialize)]
pub struct PreferenceResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub channel: ChannelType,
    pub enabled: bool,
    pub contact_info: String,
}

impl From<NotificationPreference> for PreferenceResponse {
    fn from(entity: NotificationPreference) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            channel: entity.channel,
            enabled: entity.enabled,
            contact_info: entity.contact_info,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub subject: String,
    pub status: NotificationStatus,
    pub channel: ChannelType,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(entity: Notification) -> Self {
        Self {
            subject: entity.subject,
            status: entity.status,
            channel: entity.channel,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_notification_response_omits_internal_fields() {
        let entity = Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            subject: "Hi".to_string(),
            body: "secret body".to_string(),
            channel: ChannelType::Email,
            status: NotificationStatus::Succeeded,
            deleted: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(NotificationResponse::from(entity)).unwrap();
        assert_eq!(json["subject"], "Hi");
        assert!(json.get("body").is_none());
        assert!(json.get("deleted").is_none());
        assert!(json.get("id").is_none());
    }
}

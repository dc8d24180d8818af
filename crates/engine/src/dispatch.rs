//! Dispatch engine — a single send attempt is: preference gate, channel
//! invocation, durable outcome record. The same path serves first-time sends
//! and on-demand retries of previously failed records.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use courier_common::error::AppError;
use courier_common::types::{Notification, NotificationPreference, NotificationStatus};
use courier_notifier::DeliveryChannel;

use crate::preference::PreferenceService;
use crate::store::NotificationStore;

/// Parameters for dispatching a notification to a user.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SendNotificationParams {
    pub user_id: Uuid,
    pub subject: String,
    pub body: String,
}

/// Service layer for dispatch and retry.
#[derive(Clone)]
pub struct DispatchService {
    preferences: PreferenceService,
    store: Arc<dyn NotificationStore>,
    channel: Arc<dyn DeliveryChannel>,
}

impl DispatchService {
    pub fn new(
        preferences: PreferenceService,
        store: Arc<dyn NotificationStore>,
        channel: Arc<dyn DeliveryChannel>,
    ) -> Self {
        Self {
            preferences,
            store,
            channel,
        }
    }

    /// Attempt delivery for a user and record the outcome.
    ///
    /// Fails only on gating: no preference (`NotFound`) or a disabled one
    /// (`PermissionDenied`). A delivery failure is not an operation failure;
    /// it is recorded as `Failed` on the returned notification and logged.
    pub async fn send(&self, params: &SendNotificationParams) -> Result<Notification, AppError> {
        let preference = self.gate(params.user_id).await?;

        let status = self
            .attempt(&preference.contact_info, &params.subject, &params.body)
            .await;

        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: params.user_id,
            subject: params.subject.clone(),
            body: params.body.clone(),
            channel: preference.channel,
            status,
            deleted: false,
            created_at: Utc::now(),
        };

        let saved = self.store.save(&notification).await?;
        tracing::info!(
            user_id = %params.user_id,
            notification_id = %saved.id,
            status = %saved.status,
            "Notification recorded"
        );
        Ok(saved)
    }

    /// Re-attempt every failed, non-deleted notification for a user.
    ///
    /// The preference gate is re-validated here even though `send` already
    /// enforces it: consent may have been withdrawn between the original
    /// failed attempt and this call. Each record is re-sent with its own
    /// subject and body but the user's *current* contact info, and persisted
    /// one at a time — a failed delivery does not stop the remaining records,
    /// and the batch is not atomic. `created_at` is never touched.
    pub async fn retry_failed(&self, user_id: Uuid) -> Result<(), AppError> {
        let preference = self.gate(user_id).await?;

        let failed = self
            .store
            .find_all_by_user_id_and_status(user_id, NotificationStatus::Failed)
            .await?;

        for mut notification in failed.into_iter().filter(|n| !n.deleted) {
            notification.status = self
                .attempt(
                    &preference.contact_info,
                    &notification.subject,
                    &notification.body,
                )
                .await;

            self.store.save(&notification).await?;
            tracing::debug!(
                notification_id = %notification.id,
                status = %notification.status,
                "Retry outcome recorded"
            );
        }

        Ok(())
    }

    /// Resolve the user's preference and enforce the dispatch gate.
    async fn gate(&self, user_id: Uuid) -> Result<NotificationPreference, AppError> {
        let preference = self.preferences.get_by_user_id(user_id).await?;
        if !preference.enabled {
            return Err(AppError::PermissionDenied(format!(
                "User {} does not allow receiving notifications",
                user_id
            )));
        }
        Ok(preference)
    }

    /// Invoke the channel once and fold the outcome into a status.
    async fn attempt(&self, to: &str, subject: &str, body: &str) -> NotificationStatus {
        match self.channel.deliver(to, subject, body).await {
            Ok(()) => NotificationStatus::Succeeded,
            Err(e) => {
                tracing::warn!(to, error = %e, "Delivery failed");
                NotificationStatus::Failed
            }
        }
    }
}

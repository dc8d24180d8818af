//! Preference manager — creation, update, and auto-provisioning of per-user
//! notification preferences.
//!
//! Every dispatch decision is gated on the preference this service resolves:
//! a user with no preference or `enabled = false` never receives anything.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use courier_common::error::AppError;
use courier_common::types::{ChannelType, NotificationPreference};

use crate::store::PreferenceStore;

/// Parameters for creating or replacing a user's preference.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UpsertPreferenceParams {
    pub user_id: Uuid,
    pub channel: ChannelType,
    pub contact_info: String,
    pub enabled: bool,
}

/// Service layer for preference management.
#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Create or update the preference for `params.user_id`.
    ///
    /// The existence check and the write are two separate store calls; two
    /// concurrent first-time upserts for the same user can both observe
    /// "absent" and insert twice. Storage carries no uniqueness constraint
    /// on `user_id`, so this window is real and tolerated.
    pub async fn upsert(
        &self,
        params: &UpsertPreferenceParams,
    ) -> Result<NotificationPreference, AppError> {
        let now = Utc::now();

        if let Some(mut preference) = self.store.find_by_user_id(params.user_id).await? {
            preference.channel = params.channel;
            preference.contact_info = params.contact_info.clone();
            preference.enabled = params.enabled;
            preference.updated_at = now;

            let saved = self.store.save(&preference).await?;
            tracing::info!(
                user_id = %params.user_id,
                enabled = params.enabled,
                "Preference updated"
            );
            return Ok(saved);
        }

        let preference = NotificationPreference {
            id: Uuid::new_v4(),
            user_id: params.user_id,
            channel: params.channel,
            enabled: params.enabled,
            contact_info: params.contact_info.clone(),
            created_at: now,
            updated_at: now,
        };

        let saved = self.store.save(&preference).await?;
        tracing::info!(
            user_id = %params.user_id,
            enabled = params.enabled,
            "Preference created"
        );
        Ok(saved)
    }

    /// Fetch the preference for a user, failing with `NotFound` when absent.
    pub async fn get_by_user_id(&self, user_id: Uuid) -> Result<NotificationPreference, AppError> {
        self.store.find_by_user_id(user_id).await?.ok_or_else(|| {
            AppError::NotFound(format!(
                "Notification preference for user {} was not found",
                user_id
            ))
        })
    }

    /// Flip the enabled flag on an existing preference.
    pub async fn set_enabled(
        &self,
        user_id: Uuid,
        enabled: bool,
    ) -> Result<NotificationPreference, AppError> {
        let mut preference = self.get_by_user_id(user_id).await?;
        preference.enabled = enabled;
        preference.updated_at = Utc::now();

        let saved = self.store.save(&preference).await?;
        tracing::info!(user_id = %user_id, enabled, "Preference enabled flag changed");
        Ok(saved)
    }

    /// Return the existing preference unchanged, or provision an opted-out
    /// default (email channel, `fallback_contact`) for a user who has never
    /// configured one. Lets other services reference any user safely.
    pub async fn get_or_provision(
        &self,
        user_id: Uuid,
        fallback_contact: &str,
    ) -> Result<NotificationPreference, AppError> {
        if let Some(preference) = self.store.find_by_user_id(user_id).await? {
            return Ok(preference);
        }

        self.upsert(&UpsertPreferenceParams {
            user_id,
            channel: ChannelType::Email,
            contact_info: fallback_contact.to_string(),
            enabled: false,
        })
        .await
    }
}

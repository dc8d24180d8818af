//! Store adapter contracts and their PostgreSQL implementations.
//!
//! The engine services hold these traits behind `Arc` handles injected at
//! construction time; nothing in the engine reaches for a pool or a global.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use courier_common::error::AppError;
use courier_common::types::{Notification, NotificationPreference, NotificationStatus};

/// Durable storage for per-user notification preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Look up the preference for a user, if one exists.
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NotificationPreference>, AppError>;

    /// Persist a preference, inserting or updating by id.
    async fn save(
        &self,
        preference: &NotificationPreference,
    ) -> Result<NotificationPreference, AppError>;
}

/// Durable storage for notification records.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a notification, inserting or updating by id.
    async fn save(&self, notification: &Notification) -> Result<Notification, AppError>;

    /// All non-deleted notifications for a user, in storage order.
    async fn find_all_by_user_id(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError>;

    /// All notifications for a user with the given status, soft-deleted
    /// records included. Callers filter the deletion flag themselves.
    async fn find_all_by_user_id_and_status(
        &self,
        user_id: Uuid,
        status: NotificationStatus,
    ) -> Result<Vec<Notification>, AppError>;
}

/// PostgreSQL-backed preference store.
pub struct PgPreferenceStore {
    pool: PgPool,
}

impl PgPreferenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for PgPreferenceStore {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NotificationPreference>, AppError> {
        // No uniqueness constraint on user_id: concurrent first-time upserts
        // can leave duplicate rows. Pick the oldest so callers see a stable
        // record.
        let preference: Option<NotificationPreference> = sqlx::query_as(
            "SELECT * FROM notification_preferences WHERE user_id = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(preference)
    }

    async fn save(
        &self,
        preference: &NotificationPreference,
    ) -> Result<NotificationPreference, AppError> {
        let saved: NotificationPreference = sqlx::query_as(
            r#"
            INSERT INTO notification_preferences
                (id, user_id, channel, enabled, contact_info, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET channel = EXCLUDED.channel,
                enabled = EXCLUDED.enabled,
                contact_info = EXCLUDED.contact_info,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(preference.id)
        .bind(preference.user_id)
        .bind(preference.channel)
        .bind(preference.enabled)
        .bind(&preference.contact_info)
        .bind(preference.created_at)
        .bind(preference.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }
}

/// PostgreSQL-backed notification store.
pub struct PgNotificationStore {
    pool: PgPool,
}

impl PgNotificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn save(&self, notification: &Notification) -> Result<Notification, AppError> {
        // Subject and body are immutable after creation; only the outcome
        // and the soft-delete flag may change on an existing record.
        let saved: Notification = sqlx::query_as(
            r#"
            INSERT INTO notifications
                (id, user_id, subject, body, channel, status, deleted, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET status = EXCLUDED.status,
                deleted = EXCLUDED.deleted
            RETURNING *
            "#,
        )
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(&notification.subject)
        .bind(&notification.body)
        .bind(notification.channel)
        .bind(notification.status)
        .bind(notification.deleted)
        .bind(notification.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn find_all_by_user_id(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let notifications: Vec<Notification> = sqlx::query_as(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1 AND deleted = false
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn find_all_by_user_id_and_status(
        &self,
        user_id: Uuid,
        status: NotificationStatus,
    ) -> Result<Vec<Notification>, AppError> {
        let notifications: Vec<Notification> = sqlx::query_as(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1 AND status = $2
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }
}

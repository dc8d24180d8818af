//! History manager — read and soft-delete operations over notification
//! records. Soft-deleted records stay in storage for audit but disappear
//! from history and from retry candidacy.

use std::sync::Arc;

use uuid::Uuid;

use courier_common::error::AppError;
use courier_common::types::Notification;

use crate::store::NotificationStore;

/// Service layer for notification history.
#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn NotificationStore>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// All non-deleted notifications for a user, in storage order.
    pub async fn get_history(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        self.store.find_all_by_user_id(user_id).await
    }

    /// Soft-delete the user's current history and return the deleted set.
    ///
    /// Records are written one at a time; a mid-sequence storage failure
    /// leaves the history partially cleared. Callers must not assume batch
    /// atomicity.
    pub async fn clear(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let mut notifications = self.get_history(user_id).await?;

        for notification in notifications.iter_mut() {
            notification.deleted = true;
            self.store.save(notification).await?;
        }

        tracing::info!(
            user_id = %user_id,
            cleared = notifications.len(),
            "Notification history cleared"
        );
        Ok(notifications)
    }
}

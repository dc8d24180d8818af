//! In-memory adapters for the store and channel contracts.
//!
//! Used by the engine and API tests and handy for local development without
//! PostgreSQL. Semantics mirror the real adapters: `save` upserts by id,
//! history queries filter the soft-delete flag, order is insertion order.

use std::collections::VecDeque;
use std::sync::Mutex;

use uuid::Uuid;

use courier_common::error::AppError;
use courier_common::types::{Notification, NotificationPreference, NotificationStatus};
use courier_notifier::{ChannelError, DeliveryChannel};

use crate::store::{NotificationStore, PreferenceStore};

/// Vec-backed preference store.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    rows: Mutex<Vec<NotificationPreference>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NotificationPreference>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn save(
        &self,
        preference: &NotificationPreference,
    ) -> Result<NotificationPreference, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == preference.id) {
            Some(existing) => *existing = preference.clone(),
            None => rows.push(preference.clone()),
        }
        Ok(preference.clone())
    }
}

/// Vec-backed notification store.
#[derive(Default)]
pub struct InMemoryNotificationStore {
    rows: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored record, soft-deleted ones included. Test inspection only.
    pub fn all(&self) -> Vec<Notification> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn save(&self, notification: &Notification) -> Result<Notification, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|n| n.id == notification.id) {
            Some(existing) => *existing = notification.clone(),
            None => rows.push(notification.clone()),
        }
        Ok(notification.clone())
    }

    async fn find_all_by_user_id(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|n| n.user_id == user_id && !n.deleted)
            .cloned()
            .collect())
    }

    async fn find_all_by_user_id_and_status(
        &self,
        user_id: Uuid,
        status: NotificationStatus,
    ) -> Result<Vec<Notification>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|n| n.user_id == user_id && n.status == status)
            .cloned()
            .collect())
    }
}

/// A delivery call captured by [`ScriptedChannel`].
#[derive(Debug, Clone)]
pub struct RecordedDelivery {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Channel double with programmable per-call outcomes.
///
/// Outcomes queued with [`fail_next`](Self::fail_next) and
/// [`succeed_next`](Self::succeed_next) are consumed in order; once the queue
/// is empty every delivery succeeds.
#[derive(Default)]
pub struct ScriptedChannel {
    outcomes: Mutex<VecDeque<Result<(), String>>>,
    deliveries: Mutex<Vec<RecordedDelivery>>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed_next(&self) {
        self.outcomes.lock().unwrap().push_back(Ok(()));
    }

    pub fn fail_next(&self, reason: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }

    pub fn deliveries(&self) -> Vec<RecordedDelivery> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DeliveryChannel for ScriptedChannel {
    async fn deliver(&self, to: &str, subject: &str, body: &str) -> Result<(), ChannelError> {
        self.deliveries.lock().unwrap().push(RecordedDelivery {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });

        let outcome = self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()));
        outcome.map_err(|reason| ChannelError::Rejected {
            status: 502,
            message: reason,
        })
    }
}

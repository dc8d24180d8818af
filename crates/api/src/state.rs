//! Shared application state for the Axum API server.

use std::sync::Arc;

use courier_engine::dispatch::DispatchService;
use courier_engine::history::HistoryService;
use courier_engine::preference::PreferenceService;
use courier_engine::store::{NotificationStore, PreferenceStore};
use courier_notifier::DeliveryChannel;

/// Application state shared across all route handlers via Axum `State`.
///
/// Holds the three engine services wired over whatever store and channel
/// adapters the binary (or a test) injects; handlers never see a pool or a
/// provider client directly.
#[derive(Clone)]
pub struct AppState {
    pub preferences: PreferenceService,
    pub dispatch: DispatchService,
    pub history: HistoryService,
}

impl AppState {
    pub fn new(
        preference_store: Arc<dyn PreferenceStore>,
        notification_store: Arc<dyn NotificationStore>,
        channel: Arc<dyn DeliveryChannel>,
    ) -> Self {
        let preferences = PreferenceService::new(preference_store);
        let dispatch = DispatchService::new(
            preferences.clone(),
            notification_store.clone(),
            channel,
        );
        let history = HistoryService::new(notification_store);

        Self {
            preferences,
            dispatch,
            history,
        }
    }
}

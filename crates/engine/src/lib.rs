//! Core notification engine: preference management, dispatch, retry, and
//! history over abstract store and channel adapters.

pub mod dispatch;
pub mod history;
pub mod memory;
pub mod preference;
pub mod store;

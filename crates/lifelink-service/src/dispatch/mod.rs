//! Notification dispatch: message templates, the dispatcher, and batch
//! delivery accounting.

pub mod service;
pub mod template;

pub use service::{DispatchSummary, NotificationDispatcher};

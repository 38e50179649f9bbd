//! Notification log administration service.

pub mod service;

pub use service::NotificationService;

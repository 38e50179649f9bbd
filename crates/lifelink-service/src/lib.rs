//! # lifelink-service
//!
//! Business logic for LifeLink: the donor matching engine, the
//! notification dispatcher, the unmatched-request sweep, and the thin
//! CRUD services for donors, requests, and the notification log.
//!
//! Services talk to persistence exclusively through the store traits in
//! `lifelink-database` and to the outside world through the
//! `MessageSender` trait in `lifelink-core`, so every flow here is
//! testable against the in-memory backends.

pub mod dispatch;
pub mod donor;
pub mod matching;
pub mod notification;
pub mod request;
pub mod sweep;

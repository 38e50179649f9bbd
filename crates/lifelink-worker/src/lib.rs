//! # lifelink-worker
//!
//! Cron-driven background tasks. The only scheduled task is the
//! unmatched-request sweep; its cadence comes from configuration and
//! the same operation stays invocable on demand through the HTTP
//! surface.

pub mod scheduler;

pub use scheduler::SweepScheduler;

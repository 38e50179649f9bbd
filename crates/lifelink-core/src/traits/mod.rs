//! Core traits defined in `lifelink-core` and implemented by other crates.

pub mod sender;

pub use sender::{MessageSender, SendOutcome};

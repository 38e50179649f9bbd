//! Blood request intake service.

pub mod service;

pub use service::RequestService;

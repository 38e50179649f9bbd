//! Donor directory service.

pub mod service;

pub use service::DonorService;

//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod content_catalog;
pub mod lifecycle_logger;
pub mod session_repository;

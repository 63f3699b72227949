//! Core domain concepts shared across all subdomains.
//!
//! - [`ids::SessionId`] / [`ids::TeamId`]: opaque identifiers
//! - [`error::TransitionError`]: typed rejections returned by the engine

pub mod error;
pub mod ids;

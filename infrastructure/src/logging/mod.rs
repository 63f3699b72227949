//! Logging infrastructure: structured lifecycle audit logging.
//!
//! Provides [`JsonlLifecycleLogger`], a JSONL file writer that implements
//! the [`LifecycleEventLogger`](roster_application::LifecycleEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlLifecycleLogger;

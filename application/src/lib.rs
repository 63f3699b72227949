//! Application layer for team-roster
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineConfig;
pub use ports::{
    content_catalog::ContentCatalog,
    lifecycle_logger::{LifecycleEvent, LifecycleEventLogger, NoLifecycleLogger},
    session_repository::{RepositoryError, SessionRepository},
};
pub use use_cases::auto_advance::{AdvancedSession, AutoAdvanceError, AutoAdvanceUseCase, TickReport};
pub use use_cases::build_agenda::{
    AgendaOutput, AgendaView, BuildAgendaError, BuildAgendaUseCase, ConflictGroup,
};
pub use use_cases::inspect_session::{InspectSessionError, InspectSessionUseCase, SessionInspection};
pub use use_cases::propose_transition::{
    ProposeTransitionError, ProposeTransitionInput, ProposeTransitionOutput,
    ProposeTransitionUseCase,
};
pub use use_cases::reschedule_session::{
    RescheduleError, RescheduleInput, RescheduleOutput, RescheduleSessionUseCase,
};

//! Training session entities

use crate::core::ids::{SessionId, TeamId};
use crate::focus::allocation::FocusAllocation;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a training session.
///
/// ```text
/// Draft ──> Scheduled ──> InProgress ──> PendingReview ──> Readonly
///   │           │
///   └───────────┴──> Deleted (requires reason)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Being planned; the only status in which the schedule may move.
    #[default]
    Draft,
    Scheduled,
    InProgress,
    /// Finished, waiting for attendance and outcome.
    PendingReview,
    /// Closed for good.
    Readonly,
    /// Soft-deleted.
    Deleted,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Draft => "draft",
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::PendingReview => "pending_review",
            SessionStatus::Readonly => "readonly",
            SessionStatus::Deleted => "deleted",
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Readonly | SessionStatus::Deleted)
    }

    /// Position along the forward path, `None` for `Deleted`.
    pub fn rank(&self) -> Option<u8> {
        match self {
            SessionStatus::Draft => Some(0),
            SessionStatus::Scheduled => Some(1),
            SessionStatus::InProgress => Some(2),
            SessionStatus::PendingReview => Some(3),
            SessionStatus::Readonly => Some(4),
            SessionStatus::Deleted => None,
        }
    }

    /// Statuses from which a session may still be soft-deleted.
    pub fn is_deletable(&self) -> bool {
        matches!(self, SessionStatus::Draft | SessionStatus::Scheduled)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(SessionStatus::Draft),
            "scheduled" => Ok(SessionStatus::Scheduled),
            "in_progress" => Ok(SessionStatus::InProgress),
            "pending_review" => Ok(SessionStatus::PendingReview),
            "readonly" => Ok(SessionStatus::Readonly),
            "deleted" => Ok(SessionStatus::Deleted),
            _ => Err(format!(
                "Unknown status: {}. Valid: draft, scheduled, in_progress, pending_review, readonly, deleted",
                s
            )),
        }
    }
}

/// Kind of training session. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    Court,
    Physical,
    Video,
    Meeting,
    Test,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Court => "court",
            SessionType::Physical => "physical",
            SessionType::Video => "video",
            SessionType::Meeting => "meeting",
            SessionType::Test => "test",
        }
    }

    /// Planned duration a new session of this type starts with.
    pub fn default_duration_minutes(&self) -> u32 {
        match self {
            SessionType::Court | SessionType::Test => 90,
            SessionType::Physical | SessionType::Video | SessionType::Meeting => 60,
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "court" => Ok(SessionType::Court),
            "physical" => Ok(SessionType::Physical),
            "video" => Ok(SessionType::Video),
            "meeting" => Ok(SessionType::Meeting),
            "test" => Ok(SessionType::Test),
            _ => Err(format!(
                "Unknown session type: {}. Valid: court, physical, video, meeting, test",
                s
            )),
        }
    }
}

/// Attendance recorded by the attendance subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub total_count: u32,
    pub present_count: u32,
}

impl AttendanceSummary {
    pub fn new(total_count: u32, present_count: u32) -> Self {
        Self {
            total_count,
            present_count,
        }
    }

    /// Fraction of the roster that attended, `None` for an empty roster.
    pub fn rate(&self) -> Option<f64> {
        if self.total_count == 0 {
            None
        } else {
            Some(f64::from(self.present_count) / f64::from(self.total_count))
        }
    }
}

/// Assessment recorded once a completed session has been reviewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Coach rating, 1-5.
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl ExecutionOutcome {
    pub fn new(recorded_at: DateTime<Utc>) -> Self {
        Self {
            rating: None,
            notes: None,
            recorded_at,
        }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A single training activity belonging to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: SessionId,
    pub team_id: TeamId,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub planned_duration_minutes: Option<u32>,
    #[serde(default)]
    pub session_type: SessionType,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub focus_allocation: FocusAllocation,
    #[serde(default)]
    pub main_objective: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub attendance_summary: Option<AttendanceSummary>,
    #[serde(default)]
    pub execution_outcome: Option<ExecutionOutcome>,
    #[serde(default)]
    pub deletion_reason: Option<String>,
    /// Optimistic-concurrency token owned by the persistence layer.
    #[serde(default)]
    pub version: u64,
}

impl TrainingSession {
    /// Create a new draft with the type's default duration.
    pub fn new_draft(
        id: impl Into<SessionId>,
        team_id: impl Into<TeamId>,
        session_type: SessionType,
    ) -> Self {
        Self {
            id: id.into(),
            team_id: team_id.into(),
            start_at: None,
            planned_duration_minutes: Some(session_type.default_duration_minutes()),
            session_type,
            status: SessionStatus::Draft,
            focus_allocation: FocusAllocation::default(),
            main_objective: String::new(),
            location: String::new(),
            attendance_summary: None,
            execution_outcome: None,
            deletion_reason: None,
            version: 0,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_start(mut self, start_at: DateTime<Utc>) -> Self {
        self.start_at = Some(start_at);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.planned_duration_minutes = Some(minutes);
        self
    }

    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.main_objective = objective.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_focus(mut self, focus: FocusAllocation) -> Self {
        self.focus_allocation = focus;
        self
    }

    pub fn with_attendance(mut self, summary: AttendanceSummary) -> Self {
        self.attendance_summary = Some(summary);
        self
    }

    pub fn with_outcome(mut self, outcome: ExecutionOutcome) -> Self {
        self.execution_outcome = Some(outcome);
        self
    }

    // ==================== Queries ====================

    /// Planned duration, treating zero as unset.
    pub fn duration_minutes(&self) -> Option<u32> {
        self.planned_duration_minutes.filter(|m| *m > 0)
    }

    /// End of the planned window (`start + duration`), if both are known.
    pub fn end_at(&self) -> Option<DateTime<Utc>> {
        let start = self.start_at?;
        let minutes = self.duration_minutes()?;
        Some(start + Duration::minutes(i64::from(minutes)))
    }

    pub fn has_objective(&self) -> bool {
        !self.main_objective.trim().is_empty()
    }

    pub fn has_location(&self) -> bool {
        !self.location.trim().is_empty()
    }

    pub fn is_deleted(&self) -> bool {
        self.status == SessionStatus::Deleted
    }
}

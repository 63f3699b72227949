//! Build Agenda use case.
//!
//! Read side: loads a team's sessions and projects them into a week, month
//! or range view, or the raw conflict map.

use crate::config::EngineConfig;
use crate::ports::session_repository::{RepositoryError, SessionRepository};
use chrono::NaiveDate;
use roster_domain::schedule::conflict_map;
use roster_domain::{AgendaGridBuilder, CalendarMonth, DayBucket, SessionId, TeamId};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum BuildAgendaError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Range start {from} is after its end {to}")]
    ReversedRange { from: NaiveDate, to: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaView {
    /// The week containing this date, aligned to the calendar's week start.
    Week(NaiveDate),
    Month(CalendarMonth),
    /// Busy days in an inclusive range.
    Range { from: NaiveDate, to: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaOutput {
    pub days: Vec<DayBucket>,
}

impl AgendaOutput {
    pub fn session_count(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }
}

/// One session and everything it overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictGroup {
    pub session_id: SessionId,
    pub overlaps: BTreeSet<SessionId>,
}

pub struct BuildAgendaUseCase {
    repository: Arc<dyn SessionRepository>,
    builder: AgendaGridBuilder,
}

impl BuildAgendaUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>, config: EngineConfig) -> Self {
        Self {
            repository,
            builder: AgendaGridBuilder::new(config.calendar),
        }
    }

    pub async fn execute(
        &self,
        team_id: &TeamId,
        view: AgendaView,
    ) -> Result<AgendaOutput, BuildAgendaError> {
        if let AgendaView::Range { from, to } = view
            && from > to
        {
            return Err(BuildAgendaError::ReversedRange { from, to });
        }

        let sessions = self.repository.list_for_team(team_id).await?;
        debug!("Building {:?} for team {} from {} sessions", view, team_id, sessions.len());

        let days = match view {
            AgendaView::Week(date) => {
                let start = self.builder.calendar().start_of_week(date);
                self.builder.build_week_grid(start, &sessions).to_vec()
            }
            AgendaView::Month(month) => self.builder.build_month_grid(&month, &sessions),
            AgendaView::Range { from, to } => self.builder.build_range(from, to, &sessions),
        };

        Ok(AgendaOutput { days })
    }

    /// Every conflicting session with its overlaps, ordered by id.
    pub async fn conflicts(&self, team_id: &TeamId) -> Result<Vec<ConflictGroup>, BuildAgendaError> {
        let sessions = self.repository.list_for_team(team_id).await?;
        let mut groups: Vec<_> = conflict_map(&sessions)
            .into_iter()
            .filter(|(_, overlaps)| !overlaps.is_empty())
            .map(|(session_id, overlaps)| ConflictGroup {
                session_id,
                overlaps,
            })
            .collect();
        groups.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        Ok(groups)
    }
}

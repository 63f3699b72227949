//! Output formatter trait

use roster_application::{
    AgendaOutput, ConflictGroup, ProposeTransitionOutput, RescheduleOutput, SessionInspection,
    TickReport,
};
use roster_domain::{CalendarMonth, SessionId};

/// Renders use case results for one output format
pub trait OutputFormatter {
    /// Seven consecutive days
    fn week(&self, agenda: &AgendaOutput) -> String;

    /// Padded month grid
    fn month(&self, month: CalendarMonth, agenda: &AgendaOutput) -> String;

    /// Only the days that hold sessions
    fn range(&self, agenda: &AgendaOutput) -> String;

    fn conflicts(&self, groups: &[ConflictGroup]) -> String;

    fn inspection(&self, inspection: &SessionInspection) -> String;

    fn transition(&self, output: &ProposeTransitionOutput) -> String;

    fn reschedule(&self, output: &RescheduleOutput) -> String;

    /// Everything attached to a session after an attach
    fn content(&self, session_id: &SessionId, items: &[String]) -> String;

    fn tick(&self, report: &TickReport) -> String;
}

//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use roster_application::{
    AgendaOutput, ConflictGroup, ProposeTransitionOutput, RescheduleOutput, SessionInspection,
    TickReport,
};
use roster_domain::{CalendarMonth, SessionId};
use serde::Serialize;
use serde_json::json;

/// Pretty-printed JSON for scripting
pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn week(&self, agenda: &AgendaOutput) -> String {
        Self::render(agenda)
    }

    fn month(&self, month: CalendarMonth, agenda: &AgendaOutput) -> String {
        Self::render(&json!({
            "month": month.to_string(),
            "days": agenda.days,
        }))
    }

    fn range(&self, agenda: &AgendaOutput) -> String {
        Self::render(agenda)
    }

    fn conflicts(&self, groups: &[ConflictGroup]) -> String {
        Self::render(groups)
    }

    fn inspection(&self, inspection: &SessionInspection) -> String {
        Self::render(inspection)
    }

    fn transition(&self, output: &ProposeTransitionOutput) -> String {
        Self::render(output)
    }

    fn reschedule(&self, output: &RescheduleOutput) -> String {
        Self::render(&json!({
            "plan": output.plan,
            "session": output.session,
            "saved": output.saved,
            "needs_confirmation": output.needs_confirmation(),
        }))
    }

    fn content(&self, session_id: &SessionId, items: &[String]) -> String {
        Self::render(&json!({
            "session_id": session_id,
            "content": items,
        }))
    }

    fn tick(&self, report: &TickReport) -> String {
        Self::render(report)
    }
}

//! Console output formatter for agendas and lifecycle results

use crate::output::formatter::OutputFormatter;
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use roster_application::{
    AgendaOutput, ConflictGroup, ProposeTransitionOutput, RescheduleOutput, SessionInspection,
    TickReport,
};
use roster_domain::{
    AgendaEntry, CalendarMonth, DayBucket, MoveOutcome, SessionId, SessionStatus, TeamCalendar,
};

const OBJECTIVE_WIDTH: usize = 36;
const CELL_WIDTH: usize = 7;

/// Formats results as coloured tables in the team's local time
pub struct ConsoleFormatter {
    calendar: TeamCalendar,
}

impl ConsoleFormatter {
    pub fn new(calendar: TeamCalendar) -> Self {
        Self { calendar }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}\n", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn clock(&self, at: DateTime<Utc>) -> String {
        self.calendar.local_time(at).format("%H:%M").to_string()
    }

    fn stamp(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.calendar.offset())
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }

    fn entry_line(&self, entry: &AgendaEntry) -> String {
        let end = entry
            .end_at
            .map(|end| self.clock(end))
            .unwrap_or_else(|| "?".to_string());
        let conflict = if entry.has_conflict {
            " conflict".red().bold().to_string()
        } else {
            String::new()
        };

        format!(
            "  {}-{}  {:<12} {:<9} {} focus {:>3}  {}{}\n",
            self.clock(entry.start_at),
            end,
            entry.session_id.as_str(),
            entry.session_type.as_str(),
            status_label(entry.status),
            entry.focus_total,
            truncate(&entry.main_objective, OBJECTIVE_WIDTH),
            conflict
        )
    }

    fn day_block(&self, bucket: &DayBucket) -> String {
        let Some(date) = bucket.date else {
            return String::new();
        };

        let mut output = format!("{}", date.format("%a %Y-%m-%d").to_string().bold());
        if bucket.in_progress {
            output.push_str(&format!(" {}", "live".yellow().bold()));
        }
        if bucket.pending_review_count > 0 {
            output.push_str(&format!(
                " {}",
                format!("({} awaiting review)", bucket.pending_review_count).magenta()
            ));
        }
        output.push('\n');

        if bucket.is_empty() {
            output.push_str(&format!("  {}\n", "-".dimmed()));
        }
        for entry in &bucket.entries {
            output.push_str(&self.entry_line(entry));
        }
        output
    }

    fn month_cell(bucket: &DayBucket) -> String {
        use chrono::Datelike;

        let Some(date) = bucket.date else {
            return " ".repeat(CELL_WIDTH);
        };
        let marker = match (bucket.entries.len(), bucket.conflict_count()) {
            (0, _) => String::new(),
            (n, 0) => format!("·{}", n),
            (n, _) => format!("!{}", n),
        };
        let cell = format!("{:>2}{:<width$}", date.day(), marker, width = CELL_WIDTH - 2);

        if bucket.conflict_count() > 0 {
            cell.red().to_string()
        } else if bucket.pending_review_count > 0 {
            cell.magenta().to_string()
        } else if !bucket.is_empty() {
            cell.bold().to_string()
        } else {
            cell.dimmed().to_string()
        }
    }

    fn footer(agenda: &AgendaOutput) -> String {
        let conflicts: usize = agenda.days.iter().map(DayBucket::conflict_count).sum();
        let mut line = format!("{} sessions", agenda.session_count());
        if conflicts > 0 {
            line.push_str(&format!(", {}", format!("{} in conflict", conflicts).red()));
        }
        format!("\n{}\n", line)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn week(&self, agenda: &AgendaOutput) -> String {
        let title = match agenda.days.first().and_then(|d| d.date) {
            Some(first) => format!("Week of {}", first),
            None => "Week".to_string(),
        };

        let mut output = Self::header(&title);
        for bucket in &agenda.days {
            output.push_str(&self.day_block(bucket));
        }
        output.push_str(&Self::footer(agenda));
        output
    }

    fn month(&self, month: CalendarMonth, agenda: &AgendaOutput) -> String {
        let mut output = Self::header(&month.to_string());

        let mut day = self.calendar.week_start();
        for _ in 0..7 {
            let name = format!("{:<width$}", day.to_string(), width = CELL_WIDTH);
            output.push_str(&name.cyan().to_string());
            day = day.succ();
        }
        output.push('\n');

        for week in agenda.days.chunks(7) {
            for bucket in week {
                output.push_str(&Self::month_cell(bucket));
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{}\n",
            "·n sessions   !n includes a conflict".dimmed()
        ));
        output.push_str(&Self::footer(agenda));
        output
    }

    fn range(&self, agenda: &AgendaOutput) -> String {
        let mut output = Self::header("Agenda");
        if agenda.days.is_empty() {
            output.push_str(&format!("{}\n", "No sessions in range.".dimmed()));
        }
        for bucket in &agenda.days {
            output.push_str(&self.day_block(bucket));
        }
        output.push_str(&Self::footer(agenda));
        output
    }

    fn conflicts(&self, groups: &[ConflictGroup]) -> String {
        if groups.is_empty() {
            return format!("{}\n", "No conflicts.".green());
        }

        let mut output = Self::section_header("Conflicts");
        for group in groups {
            let others = group
                .overlaps
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!(
                "  {} overlaps {}\n",
                group.session_id.as_str().bold(),
                others.red()
            ));
        }
        output
    }

    fn inspection(&self, inspection: &SessionInspection) -> String {
        let session = &inspection.session;
        let mut output = Self::header(&format!("Session {}", session.id));

        output.push_str(&format!(
            "{} {}\n",
            "Status:".cyan().bold(),
            status_label(session.status)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Type:".cyan().bold(),
            session.session_type
        ));
        if let Some(start) = session.start_at {
            let end = session
                .end_at()
                .map(|end| self.clock(end))
                .unwrap_or_else(|| "?".to_string());
            output.push_str(&format!(
                "{} {}-{}\n",
                "When:".cyan().bold(),
                self.stamp(start),
                end
            ));
        }
        if session.has_objective() {
            output.push_str(&format!(
                "{} {}\n",
                "Objective:".cyan().bold(),
                session.main_objective
            ));
        }
        if session.has_location() {
            output.push_str(&format!("{} {}\n", "Location:".cyan().bold(), session.location));
        }

        output.push_str(&Self::section_header("Focus"));
        if inspection.focus.is_empty {
            output.push_str(&format!("  {}\n", "Not yet planned".dimmed()));
        } else {
            for (category, value) in session.focus_allocation.iter() {
                let bar = "#".repeat((value / 5) as usize);
                let line = format!("  {:<14} {:>3}% {}", category.as_str(), value, bar);
                if Some(category) == inspection.focus.dominant {
                    output.push_str(&format!("{}\n", line.bold()));
                } else {
                    output.push_str(&format!("{}\n", line));
                }
            }
            let total = format!("  {:<14} {:>3}%", "total", inspection.focus.total);
            if inspection.focus.exceeds_ceiling {
                output.push_str(&format!("{} {}\n", total.yellow(), "above ceiling".yellow()));
            } else {
                output.push_str(&format!("{}\n", total));
            }
        }

        if session.status == SessionStatus::Draft {
            let readiness = &inspection.readiness;
            output.push_str(&Self::section_header(&format!(
                "Readiness {}%",
                readiness.percent
            )));
            for check in &readiness.passed {
                output.push_str(&format!("  {} {}\n", "ok".green(), check.as_str()));
            }
            for check in &readiness.pending {
                output.push_str(&format!("  {} {}\n", "..".yellow(), check.as_str()));
            }
            if !readiness.blocking.is_empty() {
                let fields = readiness
                    .blocking
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                output.push_str(&format!("  {} {}\n", "Blocking:".red().bold(), fields));
            }
        }

        output.push_str(&Self::section_header("Timing"));
        match inspection.minutes_until_start {
            Some(minutes) if minutes > 0 => {
                output.push_str(&format!("  starts in {}\n", human_minutes(minutes)));
            }
            Some(_) if session.status == SessionStatus::InProgress => {
                let remaining = inspection.minutes_remaining.unwrap_or(0);
                let done = inspection
                    .elapsed_fraction
                    .map(|f| format!(" ({:.0}% done)", f * 100.0))
                    .unwrap_or_default();
                output.push_str(&format!("  {} remaining{}\n", human_minutes(remaining), done));
            }
            Some(minutes) => {
                output.push_str(&format!("  started {} ago\n", human_minutes(-minutes)));
            }
            None => output.push_str(&format!("  {}\n", "not scheduled".dimmed())),
        }
        if let Some(action) = inspection.pending_action {
            output.push_str(&format!(
                "  {} {}\n",
                "due:".yellow().bold(),
                action.as_str()
            ));
        }

        if !inspection.conflicts.is_empty() {
            let others = inspection
                .conflicts
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!("\n{} {}\n", "Overlaps:".red().bold(), others));
        }

        output
    }

    fn transition(&self, output: &ProposeTransitionOutput) -> String {
        if !output.changed {
            return format!(
                "{} {} is already {}\n",
                "=".dimmed(),
                output.session.id,
                status_label(output.session.status)
            );
        }
        format!(
            "{} {} {} -> {} (version {})\n",
            "ok".green().bold(),
            output.session.id,
            status_label(output.from),
            status_label(output.session.status),
            output.session.version
        )
    }

    fn reschedule(&self, output: &RescheduleOutput) -> String {
        let id = &output.session.id;
        let mut text = match output.plan.outcome {
            MoveOutcome::Unchanged => format!("{} {} is already there\n", "=".dimmed(), id),
            MoveOutcome::Moved { start_at } if output.saved => format!(
                "{} {} moved to {}\n",
                "ok".green().bold(),
                id,
                self.stamp(start_at)
            ),
            MoveOutcome::Moved { start_at } => format!(
                "{} {} not moved to {}\n",
                "held".yellow().bold(),
                id,
                self.stamp(start_at)
            ),
        };

        if output.plan.has_conflicts() {
            let others = output
                .plan
                .conflicts
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(&format!("  {} {}\n", "overlaps".red(), others));
        }
        if output.needs_confirmation() {
            text.push_str(&format!("  re-run with {} to save anyway\n", "--force".cyan()));
        }
        text
    }

    fn content(&self, session_id: &SessionId, items: &[String]) -> String {
        let mut output = format!(
            "{} {} has {} content item(s)\n",
            "ok".green().bold(),
            session_id,
            items.len()
        );
        for item in items {
            output.push_str(&format!("  - {}\n", item));
        }
        output
    }

    fn tick(&self, report: &TickReport) -> String {
        if report.is_idle() {
            return format!("{}\n", "Nothing due.".dimmed());
        }

        let mut output = String::new();
        for advanced in &report.advanced {
            output.push_str(&format!(
                "{} {} {} -> {}\n",
                "ok".green().bold(),
                advanced.session_id,
                status_label(advanced.from),
                status_label(advanced.to)
            ));
        }
        for skipped in &report.skipped {
            output.push_str(&format!(
                "{} {} changed concurrently, left for the next tick\n",
                "skip".yellow(),
                skipped
            ));
        }
        output
    }
}

/// Status name in its display colour
pub fn status_label(status: SessionStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        SessionStatus::Draft => label.dimmed(),
        SessionStatus::Scheduled => label.blue(),
        SessionStatus::InProgress => label.yellow().bold(),
        SessionStatus::PendingReview => label.magenta(),
        SessionStatus::Readonly => label.green(),
        SessionStatus::Deleted => label.red().strikethrough(),
    }
}

/// Cut to `max` characters, ending in "..." when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn human_minutes(minutes: i64) -> String {
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h{:02}m", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Weekday};
    use roster_application::AdvancedSession;
    use roster_domain::{AgendaGridBuilder, SessionType, TrainingSession};
    use std::collections::BTreeSet;

    fn plain() {
        colored::control::set_override(false);
    }

    fn session(id: &str, day: u32, hour: u32) -> TrainingSession {
        TrainingSession::new_draft(id, "u18", SessionType::Court)
            .with_start(Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap())
            .with_objective("Transition defence")
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer objective", 10), "a much ...");
        assert_eq!(truncate("ééééé", 5), "ééééé");
    }

    #[test]
    fn test_human_minutes() {
        assert_eq!(human_minutes(45), "45m");
        assert_eq!(human_minutes(120), "2h");
        assert_eq!(human_minutes(95), "1h35m");
    }

    #[test]
    fn test_week_lists_entries_in_local_time() {
        plain();
        let calendar = TeamCalendar::from_offset_minutes(120, Weekday::Mon).unwrap();
        let builder = AgendaGridBuilder::new(calendar);
        let sessions = vec![session("s1", 12, 7), session("s2", 12, 8)];
        let days = builder
            .build_week_grid(NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(), &sessions)
            .to_vec();

        let text = ConsoleFormatter::new(calendar).week(&AgendaOutput { days });
        assert!(text.contains("Week of 2026-10-12"));
        assert!(text.contains("09:00-10:30"));
        assert!(text.contains("conflict"));
        assert!(text.contains("2 sessions"));
    }

    #[test]
    fn test_conflicts_listing() {
        plain();
        let formatter = ConsoleFormatter::new(TeamCalendar::default());
        assert!(formatter.conflicts(&[]).contains("No conflicts"));

        let groups = vec![ConflictGroup {
            session_id: SessionId::from("s1"),
            overlaps: BTreeSet::from([SessionId::from("s2"), SessionId::from("s3")]),
        }];
        assert!(formatter.conflicts(&groups).contains("s1 overlaps s2, s3"));
    }

    #[test]
    fn test_tick_summary() {
        plain();
        let formatter = ConsoleFormatter::new(TeamCalendar::default());
        assert!(formatter.tick(&TickReport::default()).contains("Nothing due"));

        let report = TickReport {
            advanced: vec![AdvancedSession {
                session_id: SessionId::from("s1"),
                from: SessionStatus::Scheduled,
                to: SessionStatus::InProgress,
                steps: vec![roster_domain::TransitionAction::Start],
            }],
            skipped: vec![],
        };
        assert!(
            formatter
                .tick(&report)
                .contains("s1 scheduled -> in_progress")
        );
    }

    #[test]
    fn test_content_lists_items() {
        plain();
        let items = vec!["drill-12".to_string(), "video-3".to_string()];
        let text = ConsoleFormatter::new(TeamCalendar::default())
            .content(&SessionId::from("s1"), &items);
        assert!(text.starts_with("ok s1 has 2 content item(s)"));
        assert!(text.contains("  - video-3"));
    }
}

//! CLI command definitions

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use roster_domain::{CalendarMonth, SessionStatus};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured console tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// CLI arguments for team-roster
#[derive(Parser, Debug)]
#[command(name = "team-roster")]
#[command(author, version, about = "Training session lifecycle and scheduling engine")]
#[command(long_about = r#"
Team Roster plans, schedules and closes out a team's training sessions.

Sessions move through draft -> scheduled -> in_progress -> pending_review ->
readonly. Drafts and scheduled sessions may be soft-deleted with a reason.
Start and end happen automatically once their time passes (see `tick`).

Configuration files are loaded from (in priority order):
1. TEAM_ROSTER_<SECTION>__<KEY>            Environment overrides
2. --config <path>                         Explicit config file
3. ./roster.toml                           Project-level config
4. ~/.config/team-roster/config.toml       Global config

Example:
  team-roster week -t u18 2026-10-12
  team-roster transition s-104 scheduled
  team-roster move s-104 2026-10-15 --time 17:30
  team-roster transition s-104 deleted --reason "pitch closed"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Session store file (overrides storage.data_file)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Reference time as RFC 3339 (defaults to the current time)
    #[arg(long, global = true, value_name = "TIMESTAMP", value_parser = parse_timestamp)]
    pub now: Option<DateTime<Utc>>,

    /// Output format (overrides output.format)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write diagnostics to a daily rolling file in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the week containing a date
    Week {
        #[arg(short, long)]
        team: String,

        /// Any day of the week (defaults to today)
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Show a month grid
    Month {
        #[arg(short, long)]
        team: String,

        /// Month as YYYY-MM (defaults to the current month)
        #[arg(value_parser = parse_month)]
        month: Option<CalendarMonth>,
    },

    /// List the days with sessions in an inclusive date range
    Agenda {
        #[arg(short, long)]
        team: String,

        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,

        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,
    },

    /// List every session that overlaps another
    Conflicts {
        #[arg(short, long)]
        team: String,
    },

    /// Show focus, readiness and timing of one session
    Focus {
        session_id: String,
    },

    /// Request a status change
    Transition {
        session_id: String,

        /// Target status (scheduled, in_progress, pending_review, readonly, deleted)
        #[arg(value_parser = parse_status)]
        target: SessionStatus,

        /// Reason, required for deleted
        #[arg(long)]
        reason: Option<String>,
    },

    /// Move a draft to another day
    Move {
        session_id: String,

        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// New local start time as HH:MM (keeps the current time if omitted)
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,

        /// Save even when the new slot overlaps other sessions
        #[arg(long)]
        force: bool,
    },

    /// Attach drills or other content items to a session
    Attach {
        session_id: String,

        /// Content item identifiers, e.g. drill-12
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Apply due automatic transitions (start and end) for a team
    Tick {
        #[arg(short, long)]
        team: String,
    },
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

pub fn parse_month(s: &str) -> Result<CalendarMonth, String> {
    let (year, month) = s
        .trim()
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got '{}'", s))?;
    let year: i32 = year.parse().map_err(|_| format!("bad year in '{}'", s))?;
    let month: u32 = month.parse().map_err(|_| format!("bad month in '{}'", s))?;
    CalendarMonth::new(year, month).map_err(|e| e.to_string())
}

pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|e| format!("expected HH:MM: {}", e))
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 timestamp: {}", e))
}

pub fn parse_status(s: &str) -> Result<SessionStatus, String> {
    s.trim().parse()
}

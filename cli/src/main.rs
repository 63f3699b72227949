//! CLI entrypoint for Team Roster
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::Parser;
use roster_application::{
    AgendaView, AutoAdvanceUseCase, BuildAgendaUseCase, EngineConfig, InspectSessionUseCase,
    LifecycleEventLogger, NoLifecycleLogger, ProposeTransitionInput, ProposeTransitionUseCase,
    RescheduleInput, RescheduleSessionUseCase,
};
use roster_domain::{CalendarMonth, MoveRequest, SessionId, TeamId};
use roster_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, JsonSessionStore, JsonlLifecycleLogger,
};
use roster_presentation::{
    Cli, Commands, ConsoleFormatter, JsonFormatter, OutputConfig, OutputFormat, OutputFormatter,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed.
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in file_config.validate() {
        warn!("Config: {}", issue);
    }
    let engine = file_config
        .to_engine_config()
        .context("Invalid configuration")?;

    let output = OutputConfig::resolve(
        cli.output,
        file_config.output.format.map(|f| match f {
            FileOutputFormat::Table => OutputFormat::Table,
            FileOutputFormat::Json => OutputFormat::Json,
        }),
        file_config.output.color,
        cli.no_color,
    );
    if !output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| file_config.storage.data_path());
    let store = Arc::new(
        JsonSessionStore::open(&data_path)
            .await
            .with_context(|| format!("Failed to open session store {}", data_path.display()))?,
    );
    let event_logger = open_event_logger(&file_config);

    let formatter: Box<dyn OutputFormatter> = match output.format {
        OutputFormat::Table => Box::new(ConsoleFormatter::new(engine.calendar)),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    let now = cli.now.unwrap_or_else(Utc::now);
    info!("Starting Team Roster at {} with store {}", now, store.path().display());

    let text = run(cli.command, store, event_logger, engine, now, formatter.as_ref()).await?;
    println!("{}", text.trim_end());

    Ok(())
}

async fn run(
    command: Commands,
    store: Arc<JsonSessionStore>,
    event_logger: Arc<dyn LifecycleEventLogger>,
    engine: EngineConfig,
    now: chrono::DateTime<Utc>,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    let today = engine.calendar.local_date(now);

    let text = match command {
        Commands::Week { team, date } => {
            let agenda = BuildAgendaUseCase::new(store, engine)
                .execute(&TeamId::from(team), AgendaView::Week(date.unwrap_or(today)))
                .await?;
            formatter.week(&agenda)
        }
        Commands::Month { team, month } => {
            let month = month.unwrap_or_else(|| CalendarMonth::of(today));
            let agenda = BuildAgendaUseCase::new(store, engine)
                .execute(&TeamId::from(team), AgendaView::Month(month))
                .await?;
            formatter.month(month, &agenda)
        }
        Commands::Agenda { team, from, to } => {
            let agenda = BuildAgendaUseCase::new(store, engine)
                .execute(&TeamId::from(team), AgendaView::Range { from, to })
                .await?;
            formatter.range(&agenda)
        }
        Commands::Conflicts { team } => {
            let groups = BuildAgendaUseCase::new(store, engine)
                .conflicts(&TeamId::from(team))
                .await?;
            formatter.conflicts(&groups)
        }
        Commands::Focus { session_id } => {
            let inspection = InspectSessionUseCase::new(store.clone(), store, engine)
                .execute(&SessionId::from(session_id), now)
                .await?;
            formatter.inspection(&inspection)
        }
        Commands::Transition {
            session_id,
            target,
            reason,
        } => {
            let mut input = ProposeTransitionInput::new(session_id, target, now);
            if let Some(reason) = reason {
                input = input.with_reason(reason);
            }
            let result = ProposeTransitionUseCase::new(store.clone(), store, engine)
                .with_event_logger(event_logger)
                .execute(input)
                .await?;
            formatter.transition(&result)
        }
        Commands::Move {
            session_id,
            date,
            time,
            force,
        } => {
            let mut request = MoveRequest::to_date(date);
            if let Some(time) = time {
                request = request.at_time(time);
            }
            let result = RescheduleSessionUseCase::new(store, engine)
                .with_event_logger(event_logger)
                .execute(RescheduleInput::new(session_id, request).forced(force))
                .await?;
            formatter.reschedule(&result)
        }
        Commands::Attach { session_id, items } => {
            let session_id = SessionId::from(session_id);
            let attached = store
                .attach_content(&session_id, items)
                .await
                .with_context(|| format!("Failed to attach content to {}", session_id))?;
            formatter.content(&session_id, &attached)
        }
        Commands::Tick { team } => {
            let report = AutoAdvanceUseCase::new(store)
                .with_event_logger(event_logger)
                .tick(&TeamId::from(team), now)
                .await?;
            debug!(
                "Tick advanced {} and skipped {}",
                report.advanced.len(),
                report.skipped.len()
            );
            formatter.tick(&report)
        }
    };

    Ok(text)
}

fn open_event_logger(config: &FileConfig) -> Arc<dyn LifecycleEventLogger> {
    match config
        .storage
        .event_log_path()
        .and_then(JsonlLifecycleLogger::new)
    {
        Some(logger) => {
            info!("Recording lifecycle events to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoLifecycleLogger),
    }
}

/// Console diagnostics on stderr, plus a daily rolling file when `log_dir` is set.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "team-roster.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

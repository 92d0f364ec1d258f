//! `todolist` - line-oriented task list client.
//!
//! Talks to the task API when a base URL is configured, otherwise runs an
//! in-memory demo seeded with sample tasks.

use std::fmt::Write as _;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use todolist::app::App;
use todolist::config::{ClientConfig, Command, CliArgs, TaskFields};
use todolist::service::TaskService;
use todolist::service::http::HttpTaskService;
use todolist::service::memory::MemoryTaskService;
use todolist::tasks::TaskDraft;
use todolist::view::{FilterKind, Projection, Visible};
use todolist_proto::request::TaskPatch;
use todolist_proto::task::{Task, TaskId};
use todolist_proto::wire;
use tracing_appender::non_blocking::WorkerGuard;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::from_cli(&cli)
        }
    };

    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    let command = cli.command.unwrap_or(Command::List {
        filter: None,
        search: None,
    });

    let result = match config.to_api_config() {
        Ok(Some(api)) => {
            tracing::info!(base_url = %api.base_url, "using task API");
            match HttpTaskService::new(&api) {
                Ok(service) => run(service, command, &config).await,
                Err(e) => Err(e.into()),
            }
        }
        Ok(None) => {
            tracing::info!(seeded = config.seed_demo_tasks, "running offline demo");
            let service = if config.seed_demo_tasks {
                MemoryTaskService::seeded()
            } else {
                MemoryTaskService::new()
            };
            run(service, command, &config).await
        }
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize file-based or stderr logging.
///
/// Logs go to stderr unless a log file is given, in which case a
/// non-blocking appender is used and its guard must live until exit.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let Some((log_dir, file_name)) = file_path.and_then(split_log_path) else {
        builder.with_writer(std::io::stderr).init();
        return None;
    };

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    builder.with_writer(non_blocking).with_ansi(false).init();
    Some(guard)
}

fn split_log_path(path: &Path) -> Option<(&Path, &str)> {
    let file_name = path.file_name()?.to_str()?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Some((dir, file_name))
}

/// Runs one command against a session and prints the resulting list.
async fn run<S: TaskService>(
    service: S,
    command: Command,
    config: &ClientConfig,
) -> Result<(), BoxError> {
    let mut app = App::start(service).await?;
    tracing::debug!(count = app.tasks().len(), "session started");

    match command {
        Command::List { filter, search } => {
            if let Some(kind) = filter {
                app.select_filter(kind);
            }
            if let Some(query) = search {
                app.set_search(query);
            }
        }
        Command::Add {
            text,
            fields,
            recurring,
        } => {
            *app.open_composer() = draft_from(text, fields, recurring);
            let Some(task) = app.save_composer().await? else {
                return Err("task text cannot be empty".into());
            };
            println!("Added {}", task.id);
        }
        Command::Toggle { id } => {
            let task = app.toggle_completion(&TaskId::new(id)).await?;
            let state = if task.is_completed { "done" } else { "undone" };
            println!("Marked {} as {state}", task.id);
        }
        Command::Delete { id } => {
            let id = TaskId::new(id);
            app.delete(&id).await?;
            println!("Deleted {id}");
        }
        Command::Show { id } => {
            let task = app.refresh(&TaskId::new(id)).await?;
            print_task_detail(&task, &config.date_format);
            return Ok(());
        }
        Command::Edit {
            id,
            text,
            fields,
            recurring,
            clear_due,
            clear_time,
        } => {
            let patch = TaskPatch {
                text,
                priority: fields.priority,
                category: fields.category,
                due_date: if clear_due { Some(None) } else { fields.due.map(Some) },
                due_time: if clear_time { Some(None) } else { fields.time.map(Some) },
                is_recurring: recurring,
                ..TaskPatch::default()
            };
            if patch.is_empty() {
                return Err("nothing to change".into());
            }
            let Some(task) = app.update(&TaskId::new(id), &patch).await? else {
                return Err("task text cannot be empty".into());
            };
            println!("Updated {}", task.id);
        }
    }

    print_list(&app, &config.date_format);
    Ok(())
}

fn draft_from(text: String, fields: TaskFields, recurring: bool) -> TaskDraft {
    TaskDraft {
        text,
        priority: fields.priority,
        category: fields.category,
        due_date: fields.due,
        due_time: fields.time,
        is_recurring: Some(recurring),
    }
}

fn print_list<S: TaskService>(app: &App<S>, date_format: &str) {
    let projection = app.projection();
    println!("{}", filter_header(&projection));
    if !app.search().trim().is_empty() {
        println!("Search: {}", app.search().trim());
    }

    match &projection.visible {
        Visible::NoSearchResults { query } => println!("No tasks match \"{query}\"."),
        Visible::Tasks(tasks) if tasks.is_empty() => println!("No tasks."),
        Visible::Tasks(tasks) => {
            for task in tasks {
                println!("{}", task_line(task, date_format));
            }
        }
    }
}

/// One line naming every filter with its badge count, the active one starred.
fn filter_header(projection: &Projection<'_>) -> String {
    let mut header = String::new();
    for kind in FilterKind::ALL {
        let marker = if kind == projection.filter { "*" } else { " " };
        match projection.counts.for_filter(kind) {
            Some(n) => header.push_str(&format!("{marker}{} ({n})  ", kind.label())),
            None => header.push_str(&format!("{marker}{}  ", kind.label())),
        }
    }
    header.trim_end().to_string()
}

fn task_line(task: &Task, date_format: &str) -> String {
    let check = if task.is_completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{check} {}  {}  ({}, {})",
        task.id, task.text, task.category, task.priority
    );
    if let Some(due) = due_label(task, date_format) {
        line.push_str(&format!("  due {due}"));
    }
    if task.is_recurring {
        line.push_str("  recurring");
    }
    line
}

fn print_task_detail(task: &Task, date_format: &str) {
    println!("id:        {}", task.id);
    println!("text:      {}", task.text);
    println!("completed: {}", task.is_completed);
    println!("priority:  {}", task.priority);
    println!("category:  {}", task.category);
    println!(
        "due:       {}",
        due_label(task, date_format).unwrap_or_else(|| "-".to_string())
    );
    println!("recurring: {}", task.is_recurring);
}

/// Formats the due date and time, falling back to the wire format when the
/// configured date format is invalid.
fn due_label(task: &Task, date_format: &str) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(date) = task.due_date {
        let mut text = String::new();
        if write!(text, "{}", date.format(date_format)).is_err() {
            text = wire::format_date(date);
        }
        parts.push(text);
    }
    if let Some(time) = task.due_time {
        parts.push(wire::format_time(time));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

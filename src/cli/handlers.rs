use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::cli::commands::*;
use crate::cli::output;
use crate::io::config_io;
use crate::io::store_io::JsonFileStore;
use crate::model::config::AppConfig;
use crate::model::list;
use crate::model::task::Priority;
use crate::ops::{group, view};
use crate::store::client::{
    clear_archive, ListPatch, ListStore, NewList, NewTask, TaskPatch, TaskStore,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub async fn dispatch(cli: Cli) -> CliResult {
    let json = cli.json;

    let base = match cli.data_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let config = config_io::load_config(&base)?;
    let data_dir = resolve_data_dir(&base, &config.store.data_dir);
    let store = JsonFileStore::open(&data_dir)?;
    let today = Local::now().date_naive();

    match cli.command {
        // No subcommand → the All view
        None => {
            let args = ViewArgs {
                scope: "all".to_string(),
                status: None,
                search: None,
            };
            cmd_view(&store, args, today, json).await
        }
        Some(cmd) => match cmd {
            // Read commands
            Commands::View(args) => cmd_view(&store, args, today, json).await,
            Commands::Lists(args) => cmd_lists(&store, args, &config, json).await,

            // Write commands
            Commands::Add(args) => cmd_add(&store, args, today, json).await,
            Commands::Edit(args) => cmd_edit(&store, args, today, json).await,
            Commands::Done(args) => cmd_done(&store, args, today, json).await,
            Commands::Restore(args) => cmd_restore(&store, args, today, json).await,
            Commands::Delete(args) => cmd_delete(&store, args).await,
            Commands::Clear(args) => cmd_clear(&store, args).await,
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_data_dir(base: &Path, configured: &str) -> PathBuf {
    let configured = Path::new(configured);
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        base.join(configured)
    }
}

fn parse_scope(s: &str) -> Result<view::ViewScope, String> {
    match s {
        "all" => Ok(view::ViewScope::All),
        "today" => Ok(view::ViewScope::Today),
        "upcoming" => Ok(view::ViewScope::Upcoming),
        "archive" => Ok(view::ViewScope::Archive),
        other => other
            .parse::<u32>()
            .map(view::ViewScope::List)
            .map_err(|_| format!("unknown scope '{}' (expected all, today, upcoming, archive, or a list id)", other)),
    }
}

fn parse_status(s: &str) -> Result<view::StatusFilter, String> {
    match s {
        "all" => Ok(view::StatusFilter::All),
        "active" => Ok(view::StatusFilter::Active),
        "completed" => Ok(view::StatusFilter::Completed),
        "this-week" => Ok(view::StatusFilter::ThisWeek),
        "next-week" => Ok(view::StatusFilter::NextWeek),
        other => Err(format!(
            "unknown status '{}' (expected all, active, completed, this-week, next-week)",
            other
        )),
    }
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::from_token(s)
        .ok_or_else(|| format!("unknown priority '{}' (expected high, medium, low)", s))
}

fn parse_due(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", s))
}

fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

async fn cmd_view(store: &JsonFileStore, args: ViewArgs, today: NaiveDate, json: bool) -> CliResult {
    let scope = parse_scope(&args.scope)?;
    let status = match args.status.as_deref() {
        Some(s) => parse_status(s)?,
        None => view::StatusFilter::All,
    };
    let query = view::ViewQuery {
        scope,
        status,
        search: args.search,
    };

    let tasks = TaskStore::list_all(store).await?;
    let selected = view::select(&tasks, &query, today);

    match scope {
        view::ViewScope::Upcoming => {
            let groups = group::group_upcoming(&selected, today);
            if json {
                let out: Vec<_> = groups.iter().map(|g| output::group_to_json(g, today)).collect();
                output::print_json(&out)?;
            } else {
                output::print_groups(&groups, today);
            }
        }
        view::ViewScope::Archive => {
            let groups = group::group_archive(&selected);
            if json {
                let out: Vec<_> = groups.iter().map(|g| output::group_to_json(g, today)).collect();
                output::print_json(&out)?;
            } else {
                output::print_groups(&groups, today);
            }
        }
        _ => {
            if json {
                let out: Vec<_> = selected.iter().map(|t| output::task_to_json(t, today)).collect();
                output::print_json(&out)?;
            } else {
                output::print_task_lines(&selected, today);
            }
        }
    }
    Ok(())
}

async fn cmd_lists(
    store: &JsonFileStore,
    args: ListsCmd,
    config: &AppConfig,
    json: bool,
) -> CliResult {
    match args.action {
        None => {
            let mut lists = ListStore::list_all(store).await?;
            lists.sort_by(|a, b| list::display_order(a, b));
            let tasks = TaskStore::list_all(store).await?;

            if json {
                let out: Vec<_> = lists
                    .iter()
                    .map(|l| {
                        let count = tasks.iter().filter(|t| t.list_id == Some(l.id)).count();
                        output::list_to_json(l, count)
                    })
                    .collect();
                output::print_json(&out)?;
            } else if lists.is_empty() {
                println!("  (no lists)");
            } else {
                for l in &lists {
                    let count = tasks.iter().filter(|t| t.list_id == Some(l.id)).count();
                    println!("  {:>3}  {}  [{}]  {} tasks", l.id, l.name, l.color, count);
                }
            }
            Ok(())
        }
        Some(ListsAction::Add(add)) => {
            let created = ListStore::create(
                store,
                NewList {
                    name: add.name,
                    color: add
                        .color
                        .or_else(|| Some(config.ui.default_list_color.clone())),
                    order: add.order,
                },
            )
            .await?;
            info!(list_id = created.id, "created list");
            if json {
                output::print_json(&output::list_to_json(&created, 0))?;
            } else {
                println!("created list {}: {}", created.id, created.name);
            }
            Ok(())
        }
        Some(ListsAction::Edit(edit)) => {
            let updated = ListStore::update(
                store,
                edit.id,
                ListPatch {
                    name: edit.name,
                    color: edit.color,
                    order: edit.order,
                },
            )
            .await?;
            if json {
                output::print_json(&output::list_to_json(&updated, 0))?;
            } else {
                println!("updated list {}: {}", updated.id, updated.name);
            }
            Ok(())
        }
        Some(ListsAction::Delete(del)) => {
            ListStore::delete(store, del.id).await?;
            println!("deleted list {}", del.id);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

async fn cmd_add(store: &JsonFileStore, args: AddArgs, today: NaiveDate, json: bool) -> CliResult {
    let priority = match args.priority.as_deref() {
        Some(s) => Some(parse_priority(s)?),
        None => None,
    };
    let due_date = match args.due.as_deref() {
        Some(s) => Some(parse_due(s)?),
        None => None,
    };

    let task = TaskStore::create(
        store,
        NewTask {
            title: args.title,
            description: args.desc.unwrap_or_default(),
            priority,
            due_date,
            list_id: args.list,
        },
    )
    .await?;
    info!(task_id = task.id, "created task");

    if json {
        output::print_json(&output::task_to_json(&task, today))?;
    } else {
        output::print_task_result("created", &task);
    }
    Ok(())
}

async fn cmd_edit(store: &JsonFileStore, args: EditArgs, today: NaiveDate, json: bool) -> CliResult {
    let priority = if args.no_priority {
        Some(None)
    } else {
        match args.priority.as_deref() {
            Some(s) => Some(Some(parse_priority(s)?)),
            None => None,
        }
    };
    let due_date = if args.no_due {
        Some(None)
    } else {
        match args.due.as_deref() {
            Some(s) => Some(Some(parse_due(s)?)),
            None => None,
        }
    };
    let list_id = if args.no_list {
        Some(None)
    } else {
        args.list.map(Some)
    };

    let task = TaskStore::update(
        store,
        args.id,
        TaskPatch {
            title: args.title,
            description: args.desc,
            priority,
            due_date,
            list_id,
            completed: None,
        },
    )
    .await?;

    if json {
        output::print_json(&output::task_to_json(&task, today))?;
    } else {
        output::print_task_result("updated", &task);
    }
    Ok(())
}

async fn cmd_done(store: &JsonFileStore, args: DoneArgs, today: NaiveDate, json: bool) -> CliResult {
    let task = store.toggle_complete(args.id).await?;
    if json {
        output::print_json(&output::task_to_json(&task, today))?;
    } else if task.completed {
        output::print_task_result("completed", &task);
    } else {
        output::print_task_result("reopened", &task);
    }
    Ok(())
}

async fn cmd_restore(
    store: &JsonFileStore,
    args: RestoreArgs,
    today: NaiveDate,
    json: bool,
) -> CliResult {
    let task = store.restore(args.id).await?;
    if json {
        output::print_json(&output::task_to_json(&task, today))?;
    } else {
        output::print_task_result("restored", &task);
    }
    Ok(())
}

async fn cmd_delete(store: &JsonFileStore, args: DeleteArgs) -> CliResult {
    if !args.yes {
        let prompt = format!("permanently delete {} task(s)?", args.ids.len());
        if !confirm(&prompt) {
            println!("aborted");
            return Ok(());
        }
    }

    for id in &args.ids {
        TaskStore::delete(store, *id).await?;
        println!("deleted task {}", id);
    }
    Ok(())
}

async fn cmd_clear(store: &JsonFileStore, args: ClearArgs) -> CliResult {
    if !args.yes && !confirm("permanently delete all archived tasks?") {
        println!("aborted");
        return Ok(());
    }

    let outcome = clear_archive(store).await?;
    if outcome.failed > 0 {
        println!(
            "cleared {} archived task(s), {} failed",
            outcome.deleted, outcome.failed
        );
    } else {
        println!("cleared {} archived task(s)", outcome.deleted);
    }
    Ok(())
}

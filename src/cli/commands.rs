use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tf", about = concat!("[>] taskflow v", env!("CARGO_PKG_VERSION"), " - tasks, lists, due dates"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a view (all, today, upcoming, archive, or a list id)
    View(ViewArgs),
    /// Add a task
    Add(AddArgs),
    /// Edit a task
    Edit(EditArgs),
    /// Toggle a task's completion
    Done(DoneArgs),
    /// Un-archive a completed task
    Restore(RestoreArgs),
    /// Permanently delete tasks
    Delete(DeleteArgs),
    /// Show or manage lists
    Lists(ListsCmd),
    /// Delete every archived task
    Clear(ClearArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ViewArgs {
    /// View scope: all, today, upcoming, archive, or a numeric list id
    #[arg(default_value = "all")]
    pub scope: String,
    /// Status filter (all, active, completed, this-week, next-week)
    #[arg(long)]
    pub status: Option<String>,
    /// Case-insensitive text to match against title and description
    #[arg(long)]
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Task description
    #[arg(long)]
    pub desc: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Priority (high, medium, low; default medium)
    #[arg(long)]
    pub priority: Option<String>,
    /// List id to file the task under
    #[arg(long)]
    pub list: Option<u32>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: u32,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long)]
    pub desc: Option<String>,
    /// New due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "no_due")]
    pub due: Option<String>,
    /// Clear the due date
    #[arg(long)]
    pub no_due: bool,
    /// New priority (high, medium, low)
    #[arg(long, conflicts_with = "no_priority")]
    pub priority: Option<String>,
    /// Clear the priority
    #[arg(long)]
    pub no_priority: bool,
    /// Move to this list
    #[arg(long, conflicts_with = "no_list")]
    pub list: Option<u32>,
    /// Remove from its list
    #[arg(long)]
    pub no_list: bool,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Task id
    pub id: u32,
}

#[derive(Args)]
pub struct RestoreArgs {
    /// Task id
    pub id: u32,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ids to delete
    #[arg(required = true)]
    pub ids: Vec<u32>,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// List management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListsCmd {
    #[command(subcommand)]
    pub action: Option<ListsAction>,
}

#[derive(Subcommand)]
pub enum ListsAction {
    /// Create a new list
    Add(ListsAddArgs),
    /// Edit a list
    Edit(ListsEditArgs),
    /// Delete a list (tasks keep a dangling reference)
    Delete(ListsDeleteArgs),
}

#[derive(Args)]
pub struct ListsAddArgs {
    /// List name
    pub name: String,
    /// Color token (default from config)
    #[arg(long)]
    pub color: Option<String>,
    /// Manual sort position
    #[arg(long)]
    pub order: Option<i32>,
}

#[derive(Args)]
pub struct ListsEditArgs {
    /// List id
    pub id: u32,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New color token
    #[arg(long)]
    pub color: Option<String>,
    /// New sort position
    #[arg(long)]
    pub order: Option<i32>,
}

#[derive(Args)]
pub struct ListsDeleteArgs {
    /// List id
    pub id: u32,
}

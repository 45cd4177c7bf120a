//! Command-line arguments.
//!
//! Clap-specific types stay in this module. Each argument struct converts into
//! a core record (`Task`, `Tasklist`) before it reaches the controller.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use orgaowl_core::{Task, Tasklist};
use uuid::Uuid;

/// A small checklist manager: tasks in named lists, marked done as you go.
///
/// Without a command, shows the list drawer and the active list.
#[derive(Parser)]
#[command(version, about, name = "owl")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/orgaowl/orgaowl.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Directory for cached task images. Defaults to
    /// $XDG_DATA_HOME/orgaowl/images
    #[arg(long, global = true)]
    pub images_dir: Option<PathBuf>,

    /// Active list for this invocation (name, ID or ID prefix). Defaults to
    /// the first list
    #[arg(long = "list", global = true, value_name = "LIST")]
    pub active_list: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage task lists
    #[command(alias = "l")]
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Manage tasks in the active list
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Print every list with its tasks as JSON
    Export,
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Show all lists with their progress
    #[command(alias = "l")]
    Ls,
    /// Create a list and make it active
    #[command(alias = "a")]
    Add(AddListArgs),
    /// Rename a list
    #[command(alias = "mv")]
    Rename(RenameListArgs),
    /// Delete a list together with its tasks
    #[command(aliases = ["d", "rm"])]
    Delete(ListSelector),
    /// Show the tasks of a list (the active one by default)
    #[command(alias = "s")]
    Show(ShowListArgs),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to the active list
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Change a task's name or extra note
    #[command(alias = "e")]
    Edit(EditTaskArgs),
    /// Mark a task done, or not done again
    #[command(alias = "x")]
    Toggle(TaskSelector),
    /// Delete a task
    #[command(aliases = ["d", "rm"])]
    Delete(TaskSelector),
    /// Attach, show or clear a task's image
    #[command(alias = "i")]
    Image(ImageArgs),
}

#[derive(ClapArgs)]
pub struct AddListArgs {
    /// Name of the new list
    pub name: String,
}

impl From<AddListArgs> for Tasklist {
    fn from(val: AddListArgs) -> Self {
        Tasklist::new(val.name)
    }
}

#[derive(ClapArgs)]
pub struct RenameListArgs {
    /// List to rename (name, ID or ID prefix)
    pub list: String,
    /// New name
    pub name: String,
}

#[derive(ClapArgs)]
pub struct ListSelector {
    /// List name, ID or ID prefix
    pub list: String,
}

#[derive(ClapArgs)]
pub struct ShowListArgs {
    /// List name, ID or ID prefix
    pub list: Option<String>,
}

#[derive(ClapArgs)]
pub struct AddTaskArgs {
    /// What to do
    pub name: String,
    /// Free-text note shown next to the name
    #[arg(short, long)]
    pub extra: Option<String>,
}

impl AddTaskArgs {
    /// Builds the new task for the given list.
    pub fn into_task(self, tasklist: Uuid) -> Task {
        Task::new(self.name)
            .in_list(tasklist)
            .with_extra(self.extra.unwrap_or_default())
    }
}

#[derive(ClapArgs)]
pub struct EditTaskArgs {
    /// Task ID or ID prefix
    pub task: String,
    /// New name
    #[arg(short, long)]
    pub name: Option<String>,
    /// New extra note; pass an empty string to clear it
    #[arg(short, long)]
    pub extra: Option<String>,
}

#[derive(ClapArgs)]
pub struct TaskSelector {
    /// Task ID or ID prefix
    pub task: String,
}

#[derive(ClapArgs)]
pub struct ImageArgs {
    /// Task ID or ID prefix
    pub task: String,
    /// Image file to copy into the cache and attach
    pub file: Option<PathBuf>,
    /// Detach the current image and remove it from the cache
    #[arg(long, conflicts_with = "file")]
    pub clear: bool,
}

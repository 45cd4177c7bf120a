//! Command handlers.
//!
//! Every command reads the controller's snapshot, sends at most a couple of
//! intents, waits for them and for the snapshot to catch up, then renders
//! markdown through the [`TerminalRenderer`].

use anyhow::{bail, Context, Result};
use log::debug;
use orgaowl_core::{
    CreateResult, DeleteResult, Drawer, ImageCache, OperationStatus, Task, Tasklist,
    TasklistController, TasklistUiState, UpdateResult,
};
use tokio::task::JoinHandle;

use crate::{
    args::{EditTaskArgs, ImageArgs, ListCommands, RenameListArgs, TaskCommands},
    renderer::TerminalRenderer,
};

pub struct Cli {
    controller: TasklistController,
    renderer: TerminalRenderer,
    images: ImageCache,
}

impl Cli {
    pub fn new(
        controller: TasklistController,
        renderer: TerminalRenderer,
        images: ImageCache,
    ) -> Self {
        Self {
            controller,
            renderer,
            images,
        }
    }

    /// Waits for the first load and optionally switches the active list.
    pub async fn load(&self, active_list: Option<&str>) -> Result<()> {
        let state = self
            .controller
            .loaded()
            .await
            .context("Failed to load task lists")?;

        if let Some(selector) = active_list {
            let id = state.find_tasklist(selector)?.tasklist.id;
            debug!("Switching active list to {id}");
            self.controller.set_current_tasklist(id);
        }
        Ok(())
    }

    /// Shows the drawer followed by the active list.
    pub fn show_active(&self) -> Result<()> {
        let state = self.controller.snapshot();
        let mut output = Drawer(&state).to_string();
        if let Some(current) = state.current_tasklist() {
            output.push('\n');
            output.push_str(&current.to_string());
        }
        self.renderer.render(&output)
    }

    pub async fn handle_list_command(&self, command: ListCommands) -> Result<()> {
        match command {
            ListCommands::Ls => {
                let state = self.controller.snapshot();
                self.renderer.render(&Drawer(&state).to_string())
            }
            ListCommands::Add(args) => {
                let tasklist: Tasklist = args.into();
                self.apply(self.controller.add_tasklist(tasklist.clone()))
                    .await?;
                self.renderer
                    .render(&CreateResult::new(tasklist).to_string())
            }
            ListCommands::Rename(args) => self.rename_list(args).await,
            ListCommands::Delete(args) => {
                let tasklist = self
                    .controller
                    .snapshot()
                    .find_tasklist(&args.list)?
                    .clone();
                let state = self
                    .apply(self.controller.delete_tasklist(tasklist.tasklist.clone()))
                    .await?;
                for task in tasklist.tasks.iter().filter(|t| t.has_image()) {
                    self.images.remove(&task.image_path)?;
                }

                let mut output = DeleteResult::new(tasklist.tasklist).to_string();
                let status = match state.current_tasklist() {
                    Some(current) => {
                        OperationStatus::success(format!("Active list: {}", current.tasklist.name))
                    }
                    None => OperationStatus::success("No lists left"),
                };
                output.push_str(&status.to_string());
                self.renderer.render(&output)
            }
            ListCommands::Show(args) => {
                let state = self.controller.snapshot();
                let tasklist = match args.list.as_deref() {
                    Some(selector) => state.find_tasklist(selector)?,
                    None => match state.current_tasklist() {
                        Some(current) => current,
                        None => bail!("No lists yet; create one with `owl list add NAME`"),
                    },
                };
                self.renderer.render(&tasklist.to_string())
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let Some(tasklist) = self.controller.snapshot().current_list else {
                    bail!("No lists yet; create one with `owl list add NAME`");
                };
                let task = args.into_task(tasklist);
                self.apply(self.controller.add_task(task.clone())).await?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::Edit(args) => self.edit_task(args).await,
            TaskCommands::Toggle(args) => {
                let task = self.find_task(&args.task)?.toggled();
                let change = if task.done {
                    "Marked done"
                } else {
                    "Marked not done"
                };
                self.apply(self.controller.update_task(task.clone())).await?;
                self.renderer.render(
                    &UpdateResult::with_changes(task, vec![change.to_string()]).to_string(),
                )
            }
            TaskCommands::Delete(args) => {
                let task = self.find_task(&args.task)?;
                self.apply(self.controller.delete_task(task.clone())).await?;
                self.images.remove(&task.image_path)?;
                self.renderer.render(&DeleteResult::new(task).to_string())
            }
            TaskCommands::Image(args) => self.handle_image(args).await,
        }
    }

    /// Prints every list with its tasks as pretty JSON, bypassing markdown.
    pub fn export(&self) -> Result<()> {
        let state = self.controller.snapshot();
        let json = serde_json::to_string_pretty(state.tasklists())
            .context("Failed to serialize task lists")?;
        println!("{json}");
        Ok(())
    }

    async fn rename_list(&self, args: RenameListArgs) -> Result<()> {
        let old = self
            .controller
            .snapshot()
            .find_tasklist(&args.list)?
            .tasklist
            .clone();
        let renamed = old.clone().with_name(args.name);

        self.apply(self.controller.update_tasklist(renamed.clone()))
            .await?;
        let changes = vec![format!("Renamed from '{}'", old.name)];
        self.renderer
            .render(&UpdateResult::with_changes(renamed, changes).to_string())
    }

    async fn edit_task(&self, args: EditTaskArgs) -> Result<()> {
        let mut task = self.find_task(&args.task)?;
        let mut changes = Vec::new();

        if let Some(name) = args.name {
            changes.push(format!("Renamed from '{}'", task.name));
            task = task.with_name(name);
        }
        if let Some(extra) = args.extra {
            changes.push(if extra.is_empty() {
                "Cleared extra note".to_string()
            } else {
                format!("Set extra note to '{extra}'")
            });
            task = task.with_extra(extra);
        }
        if changes.is_empty() {
            bail!("Nothing to change; pass --name and/or --extra");
        }

        self.apply(self.controller.update_task(task.clone())).await?;
        self.renderer
            .render(&UpdateResult::with_changes(task, changes).to_string())
    }

    async fn handle_image(&self, args: ImageArgs) -> Result<()> {
        let task = self.find_task(&args.task)?;

        let (updated, change) = match (args.file, args.clear) {
            (Some(file), _) => {
                let name = self
                    .images
                    .store(&file)
                    .with_context(|| format!("Failed to cache image {}", file.display()))?;
                (
                    task.clone().with_image_path(name),
                    format!("Attached image {}", file.display()),
                )
            }
            (None, true) => {
                if !task.has_image() {
                    return self
                        .renderer
                        .render(&OperationStatus::failure("Task has no image").to_string());
                }
                (task.clone().with_image_path(""), "Cleared image".to_string())
            }
            (None, false) => {
                let status = match self.images.path_for(&task.image_path) {
                    Some(path) => OperationStatus::success(path.display().to_string()),
                    None => OperationStatus::failure("Task has no image"),
                };
                return self.renderer.render(&status.to_string());
            }
        };

        self.apply(self.controller.update_task(updated.clone()))
            .await?;
        self.images.remove(&task.image_path)?;
        self.renderer
            .render(&UpdateResult::with_changes(updated, vec![change]).to_string())
    }

    fn find_task(&self, selector: &str) -> Result<Task> {
        Ok(self.controller.snapshot().find_task(selector)?.clone())
    }

    /// Waits for an intent and for the snapshot to reflect it.
    async fn apply(&self, intent: JoinHandle<orgaowl_core::Result<()>>) -> Result<TasklistUiState> {
        intent.await.context("Intent task failed")??;
        Ok(self.controller.synced().await?)
    }
}

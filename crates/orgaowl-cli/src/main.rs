//! OrgaOwl CLI application
//!
//! Command-line front end for the OrgaOwl task lists: a drawer of lists, the
//! active list's tasks, and commands to add, edit, toggle and delete them.

mod args;
mod cli;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use orgaowl_core::{ImageCache, RepositoryBuilder, TasklistController};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        images_dir,
        active_list,
        no_color,
        command,
    } = Args::parse();

    let mut builder = RepositoryBuilder::new();
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    let repository = builder
        .build()
        .await
        .context("Failed to open task store")?;
    info!("OrgaOwl started with {}", repository.database_path().display());

    let images = match images_dir {
        Some(dir) => ImageCache::new(dir),
        None => ImageCache::open_default().context("Failed to open image cache")?,
    };

    let controller = TasklistController::new(Arc::new(repository));
    let cli = Cli::new(controller, TerminalRenderer::new(!no_color), images);
    cli.load(active_list.as_deref()).await?;

    match command {
        Some(List { command }) => cli.handle_list_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Export) => cli.export(),
        None => cli.show_active(),
    }
}

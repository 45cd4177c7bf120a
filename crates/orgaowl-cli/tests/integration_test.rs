//! CLI output matches the core Display implementations for the same data.

use std::process::Command;

use orgaowl_core::{
    Drawer, RepositoryBuilder, SqliteTaskRepository, Task, TaskRepository, Tasklist,
    TasklistUiState,
};
use tempfile::TempDir;

async fn create_test_repository() -> (SqliteTaskRepository, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let repository = RepositoryBuilder::new()
        .with_database_path(temp_dir.path().join("test.db"))
        .build()
        .await
        .expect("Failed to create repository");
    (repository, temp_dir)
}

/// Run a CLI command against the repository's store and capture its output
fn run_cli_command(
    repository: &SqliteTaskRepository,
    temp_dir: &TempDir,
    args: &[&str],
) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_owl"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(repository.database_path())
        .arg("--images-dir")
        .arg(temp_dir.path().join("images"))
        .args(args)
        .output()
        .expect("Failed to run CLI command");
    assert!(output.status.success());
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_list_show_matches_display() {
    let (repository, temp_dir) = create_test_repository().await;

    let groceries = Tasklist::new("Groceries");
    repository.insert_tasklist(&groceries).await.unwrap();
    repository
        .insert_task(&Task::new("Carrots").in_list(groceries.id).with_done(true))
        .await
        .unwrap();
    repository
        .insert_task(&Task::new("Milk").in_list(groceries.id).with_extra("2l"))
        .await
        .unwrap();

    let lists = repository.observe_lists_with_tasks().borrow().clone();
    let expected = lists[1].to_string();

    let output = run_cli_command(&repository, &temp_dir, &["list", "show", "groceries"]);
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_drawer_matches_display() {
    let (repository, temp_dir) = create_test_repository().await;
    let work = Tasklist::new("Work");
    repository.insert_tasklist(&work).await.unwrap();

    let state = TasklistUiState {
        available_tasklists: Some(repository.observe_lists_with_tasks().borrow().clone()),
        current_list: Some(work.id),
        ..Default::default()
    };
    let expected = Drawer(&state).to_string();

    let output = run_cli_command(&repository, &temp_dir, &["--list", "work", "list", "ls"]);
    assert_eq!(output, expected);
}

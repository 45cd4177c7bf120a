use orgaowl_core::{RepositoryBuilder, SqliteTaskRepository};
use tempfile::TempDir;

/// Helper function to create a SQLite repository in a fresh directory
pub async fn create_test_repository() -> (TempDir, SqliteTaskRepository) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let repository = RepositoryBuilder::new()
        .with_database_path(&db_path)
        .build()
        .await
        .expect("Failed to create repository");
    (temp_dir, repository)
}

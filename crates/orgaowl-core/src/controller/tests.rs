//! Tests for the list state controller.

use async_trait::async_trait;
use jiff::Timestamp;

use super::*;
use crate::gateway::MemoryTaskRepository;

/// Accepts every write but never re-emits, like a live query that has not
/// caught up yet.
struct SilentRepository {
    lists_tx: watch::Sender<Vec<TasklistWithTasks>>,
}

impl SilentRepository {
    fn new(lists: Vec<TasklistWithTasks>) -> Self {
        let (lists_tx, _) = watch::channel(lists);
        Self { lists_tx }
    }
}

#[async_trait]
impl TaskRepository for SilentRepository {
    fn observe_lists_with_tasks(&self) -> watch::Receiver<Vec<TasklistWithTasks>> {
        self.lists_tx.subscribe()
    }

    async fn all_tasks(&self) -> Result<Vec<Task>> {
        Ok(Vec::new())
    }

    async fn all_tasklists(&self) -> Result<Vec<Tasklist>> {
        Ok(Vec::new())
    }

    async fn insert_task(&self, _task: &Task) -> Result<()> {
        Ok(())
    }

    async fn update_task(&self, _task: &Task) -> Result<()> {
        Ok(())
    }

    async fn delete_task(&self, _task: &Task) -> Result<()> {
        Ok(())
    }

    async fn insert_tasklist(&self, _tasklist: &Tasklist) -> Result<()> {
        Ok(())
    }

    async fn update_tasklist(&self, _tasklist: &Tasklist) -> Result<()> {
        Ok(())
    }

    async fn delete_tasklist(&self, _tasklist: &Tasklist) -> Result<()> {
        Ok(())
    }
}

/// Helper function to create a controller over pre-filled lists
fn create_test_controller(
    tasklists: Vec<Tasklist>,
    tasks: Vec<Task>,
) -> (Arc<MemoryTaskRepository>, TasklistController) {
    let repository = Arc::new(MemoryTaskRepository::with_data(tasklists, tasks));
    let controller = TasklistController::new(repository.clone());
    (repository, controller)
}

fn ids(state: &TasklistUiState) -> Vec<Uuid> {
    state.tasklists().iter().map(|l| l.tasklist.id).collect()
}

#[tokio::test]
async fn test_starts_loading_then_loads() {
    let a = Tasklist::new("A");
    let (_repository, controller) = create_test_controller(vec![a.clone()], vec![]);

    // the listener has not run yet on this single-threaded runtime
    let initial = controller.snapshot();
    assert!(initial.is_loading);
    assert!(initial.available_tasklists.is_none());
    assert!(initial.current_list.is_none());

    let state = controller.loaded().await.expect("Failed to load");
    assert!(!state.is_loading);
    assert_eq!(ids(&state), vec![a.id]);
    assert!(state.error_msg.is_none());
}

#[tokio::test]
async fn test_first_list_becomes_active_once() {
    let a = Tasklist::new("A");
    let b = Tasklist::new("B");
    let (_repository, controller) = create_test_controller(vec![a.clone(), b.clone()], vec![]);

    let state = controller.loaded().await.unwrap();
    assert_eq!(state.current_list, Some(a.id));

    controller.set_current_tasklist(b.id);
    controller
        .add_task(Task::new("milk").in_list(a.id))
        .await
        .unwrap()
        .unwrap();

    let state = controller.synced().await.unwrap();
    assert_eq!(state.current_list, Some(b.id));
    assert_eq!(state.tasklists()[0].tasks.len(), 1);
}

#[tokio::test]
async fn test_empty_store_has_no_active_list() {
    let (_repository, controller) = create_test_controller(vec![], vec![]);

    let state = controller.loaded().await.unwrap();
    assert_eq!(state.available_tasklists, Some(vec![]));
    assert!(state.current_list.is_none());
    assert!(state.current_tasks().is_empty());
}

#[tokio::test]
async fn test_new_list_is_active_before_reemission() {
    let a = TasklistWithTasks::new(Tasklist::new("A"), vec![]);
    let controller = TasklistController::new(Arc::new(SilentRepository::new(vec![a.clone()])));
    controller.loaded().await.unwrap();

    let l = Tasklist::new("L");
    controller.add_tasklist(l.clone()).await.unwrap().unwrap();

    let state = controller.snapshot();
    assert_eq!(state.current_list, Some(l.id));
    // the live query has not delivered L
    assert_eq!(ids(&state), vec![a.tasklist.id]);
}

#[tokio::test]
async fn test_new_list_is_active_and_loaded() {
    let a = Tasklist::new("A");
    let (_repository, controller) = create_test_controller(vec![a.clone()], vec![]);
    controller.loaded().await.unwrap();

    let l = Tasklist::new("L");
    controller.add_tasklist(l.clone()).await.unwrap().unwrap();
    assert_eq!(controller.snapshot().current_list, Some(l.id));

    let state = controller.synced().await.unwrap();
    assert_eq!(ids(&state), vec![a.id, l.id]);
    assert_eq!(state.current_tasklist().unwrap().tasklist.name, "L");
}

#[tokio::test]
async fn test_scenario_add_complete_delete_last_list() {
    let a = Tasklist::new("A");
    let (_repository, controller) = create_test_controller(vec![a.clone()], vec![]);
    controller.loaded().await.unwrap();

    let t1 = Task::new("t1").in_list(a.id);
    controller.add_task(t1.clone()).await.unwrap().unwrap();
    let state = controller.synced().await.unwrap();
    let tasks = &state.current_tasklist().unwrap().tasks;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, t1.id);

    let t2 = Task::new("t2").in_list(a.id);
    controller.add_task(t2.clone()).await.unwrap().unwrap();
    controller
        .update_task(t1.clone().with_done(true))
        .await
        .unwrap()
        .unwrap();

    let state = controller.synced().await.unwrap();
    let order: Vec<_> = state.current_tasks().into_iter().map(|t| t.id).collect();
    assert_eq!(order, vec![t2.id, t1.id]);

    // policy: deleting the only list leaves no active list
    controller.delete_tasklist(a.clone()).await.unwrap().unwrap();
    let state = controller.synced().await.unwrap();
    assert!(state.current_list.is_none());
    assert!(state.tasklists().is_empty());
    assert!(state.current_tasklist().is_none());
}

#[tokio::test]
async fn test_delete_falls_back_to_first_remaining_list() {
    let a = Tasklist::new("A");
    let b = Tasklist::new("B");
    let c = Tasklist::new("C");
    let (_repository, controller) =
        create_test_controller(vec![a.clone(), b.clone(), c.clone()], vec![]);
    controller.loaded().await.unwrap();

    controller.set_current_tasklist(b.id);
    controller.delete_tasklist(b.clone()).await.unwrap().unwrap();
    assert_eq!(controller.snapshot().current_list, Some(a.id));

    // deleting any list re-selects the first one, even if another was active
    controller.set_current_tasklist(c.id);
    controller.delete_tasklist(a.clone()).await.unwrap().unwrap();
    assert_eq!(controller.snapshot().current_list, Some(c.id));
}

#[tokio::test]
async fn test_lists_appearing_after_empty_state_get_default() {
    let a = Tasklist::new("A");
    let (repository, controller) = create_test_controller(vec![a.clone()], vec![]);
    controller.loaded().await.unwrap();

    controller.delete_tasklist(a).await.unwrap().unwrap();
    assert!(controller.synced().await.unwrap().current_list.is_none());

    // a list created behind the controller's back still becomes the default
    let b = Tasklist::new("B");
    repository.insert_tasklist(&b).await.unwrap();
    assert_eq!(controller.synced().await.unwrap().current_list, Some(b.id));
}

#[tokio::test]
async fn test_writes_stamp_strictly_increasing_times() {
    let a = Tasklist::new("A");
    let future = Timestamp::from_millisecond(Timestamp::now().as_millisecond() + 3_600_000).unwrap();
    let seeded = Task::new("from the future").in_list(a.id).touched_at(future);
    let (repository, controller) = create_test_controller(vec![a.clone()], vec![seeded.clone()]);
    controller.loaded().await.unwrap();

    let mut last = future;
    let mut task = seeded;
    for i in 0..5 {
        task = task.with_extra(i.to_string());
        controller.update_task(task.clone()).await.unwrap().unwrap();

        let stored = repository.all_tasks().await.unwrap().remove(0);
        assert!(stored.modified_at > last, "write {i} was not stamped later");
        last = stored.modified_at;
    }
}

#[tokio::test]
async fn test_failed_intent_keeps_last_good_state() {
    let a = Tasklist::new("A");
    let (_repository, controller) = create_test_controller(vec![a.clone()], vec![]);
    let before = controller.loaded().await.unwrap();

    let ghost = Task::new("ghost").in_list(a.id);
    let result = controller.update_task(ghost.clone()).await.unwrap();
    assert!(matches!(result, Err(OwlError::TaskNotFound { id }) if id == ghost.id));

    let orphan = Task::new("orphan").in_list(Uuid::new_v4());
    assert!(controller.add_task(orphan).await.unwrap().is_err());

    let after = controller.synced().await.unwrap();
    assert_eq!(after, before);
    assert!(after.error_msg.is_none());
}

#[tokio::test]
async fn test_rename_and_delete_task() {
    let a = Tasklist::new("A");
    let t = Task::new("bread").in_list(a.id);
    let (_repository, controller) = create_test_controller(vec![a.clone()], vec![t.clone()]);
    controller.loaded().await.unwrap();

    controller
        .update_tasklist(a.clone().with_name("Bakery"))
        .await
        .unwrap()
        .unwrap();
    controller.delete_task(t).await.unwrap().unwrap();

    let state = controller.synced().await.unwrap();
    let list = state.current_tasklist().unwrap();
    assert_eq!(list.tasklist.name, "Bakery");
    assert!(list.tasks.is_empty());
}

#[tokio::test]
async fn test_subscribers_get_latest_snapshot() {
    let a = Tasklist::new("A");
    let (_repository, controller) = create_test_controller(vec![a.clone()], vec![]);
    controller.loaded().await.unwrap();

    let state_rx = controller.state();
    assert_eq!(state_rx.borrow().current_list, Some(a.id));
    assert!(!state_rx.borrow().is_loading);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_intents_are_all_applied() {
    let a = Tasklist::new("A");
    let (_repository, controller) = create_test_controller(vec![a.clone()], vec![]);
    controller.loaded().await.unwrap();

    let handles: Vec<_> = (0..20)
        .map(|i| controller.add_task(Task::new(format!("task {i}")).in_list(a.id)))
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let state = controller.synced().await.unwrap();
    assert_eq!(state.current_tasklist().unwrap().tasks.len(), 20);
}

use serde::{
  Deserialize,
  Serialize
};
use tracing::debug;

use crate::task::{
  Task,
  TaskId
};

/// Ordered task list. Every operation
/// consumes the current value and
/// returns the next one; operations on
/// unknown ids hand the list back
/// unchanged.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(transparent)]
pub struct TaskStore {
  tasks: Vec<Task>
}

impl TaskStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_tasks(
    tasks: Vec<Task>
  ) -> Self {
    Self { tasks }
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn get(
    &self,
    id: TaskId
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  pub fn contains(
    &self,
    id: TaskId
  ) -> bool {
    self.position(id).is_some()
  }

  fn position(
    &self,
    id: TaskId
  ) -> Option<usize> {
    self
      .tasks
      .iter()
      .position(|task| task.id == id)
  }

  pub fn add(
    mut self,
    id: TaskId,
    raw: &str
  ) -> Self {
    match Task::from_input(id, raw) {
      | Some(task) => {
        debug!(%id, "adding task");
        self.tasks.push(task);
      }
      | None => {
        debug!("ignoring blank task text");
      }
    }
    self
  }

  pub fn toggle(
    mut self,
    id: TaskId
  ) -> Self {
    if let Some(task) = self
      .tasks
      .iter_mut()
      .find(|task| task.id == id)
    {
      task.completed = !task.completed;
    } else {
      debug!(%id, "toggle: no such task");
    }
    self
  }

  pub fn delete(
    mut self,
    id: TaskId
  ) -> Self {
    let before = self.tasks.len();
    self
      .tasks
      .retain(|task| task.id != id);
    if self.tasks.len() == before {
      debug!(%id, "delete: no such task");
    }
    self
  }

  /// Moves `dragged` into the slot
  /// `target` occupied before the move.
  pub fn reorder(
    mut self,
    dragged: TaskId,
    target: TaskId
  ) -> Self {
    if dragged == target {
      return self;
    }

    let (Some(from), Some(to)) = (
      self.position(dragged),
      self.position(target)
    ) else {
      debug!(
        %dragged,
        %target,
        "reorder: unknown task"
      );
      return self;
    };

    let task = self.tasks.remove(from);
    self.tasks.insert(to, task);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::TaskStore;
  use crate::task::TaskId;

  fn ids(store: &TaskStore) -> Vec<u64> {
    store
      .tasks()
      .iter()
      .map(|task| task.id.0)
      .collect()
  }

  fn abcd() -> TaskStore {
    TaskStore::new()
      .add(TaskId(1), "a")
      .add(TaskId(2), "b")
      .add(TaskId(3), "c")
      .add(TaskId(4), "d")
  }

  #[test]
  fn whitespace_add_leaves_count_unchanged()
   {
    let store =
      TaskStore::new().add(TaskId(1), "  ");
    assert!(store.is_empty());
  }

  #[test]
  fn add_appends_at_end() {
    let store = abcd();
    assert_eq!(ids(&store), vec![1, 2, 3, 4]);
    assert_eq!(
      store
        .tasks()
        .last()
        .map(|task| task.text.as_str()),
      Some("d")
    );
  }

  #[test]
  fn toggle_twice_restores_state() {
    let store = TaskStore::new()
      .add(TaskId(1), "Buy milk");
    let once = store.toggle(TaskId(1));
    assert_eq!(
      once.get(TaskId(1)).map(|t| t.completed),
      Some(true)
    );
    let twice = once.toggle(TaskId(1));
    assert_eq!(
      twice.get(TaskId(1)).map(|t| t.completed),
      Some(false)
    );
  }

  #[test]
  fn unknown_ids_are_noops() {
    let store = abcd();
    let same = store
      .clone()
      .toggle(TaskId(99))
      .delete(TaskId(99))
      .reorder(TaskId(99), TaskId(1));
    assert_eq!(same, store);
  }

  #[test]
  fn delete_removes_only_matching_task() {
    let store = abcd().delete(TaskId(2));
    assert_eq!(ids(&store), vec![1, 3, 4]);
  }

  #[test]
  fn reorder_forward_and_backward() {
    let forward =
      abcd().reorder(TaskId(1), TaskId(3));
    assert_eq!(
      ids(&forward),
      vec![2, 3, 1, 4]
    );

    let backward =
      abcd().reorder(TaskId(4), TaskId(2));
    assert_eq!(
      ids(&backward),
      vec![1, 4, 2, 3]
    );
  }

  #[test]
  fn reorder_keeps_membership() {
    let store = abcd();
    let moved = store
      .clone()
      .reorder(TaskId(2), TaskId(4));
    assert_ne!(ids(&moved), ids(&store));
    let mut a = ids(&moved);
    let mut b = ids(&store);
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
  }

  #[test]
  fn reorder_onto_itself_is_noop() {
    let store = abcd();
    assert_eq!(
      store
        .clone()
        .reorder(TaskId(2), TaskId(2)),
      store
    );
  }
}

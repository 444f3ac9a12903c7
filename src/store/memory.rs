//! In-memory store implementation.
//!
//! The deterministic test double for the remote record API: seedable from
//! wire records, no IO, same mutation semantics as the file-backed store.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::model::list::List;
use crate::model::task::Task;
use crate::store::client::{
    self, ListPatch, ListStore, NewList, NewTask, TaskPatch, TaskStore,
};
use crate::store::error::StoreError;
use crate::store::record::{ListRecord, TaskRecord};

// Lock poisoning is not recovered from: a panic mid-mutation leaves the
// collections in an unknown state, so the `lock().unwrap()` calls below
// propagate it.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tasks: Mutex<Vec<Task>>,
    lists: Mutex<Vec<List>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from canonical records
    pub fn seeded(tasks: Vec<Task>, lists: Vec<List>) -> Self {
        InMemoryStore {
            tasks: Mutex::new(tasks),
            lists: Mutex::new(lists),
        }
    }

    /// Seed from wire records, running them through normalization
    pub fn from_records(
        tasks: Vec<TaskRecord>,
        lists: Vec<ListRecord>,
    ) -> Result<Self, StoreError> {
        let tasks = tasks
            .into_iter()
            .map(TaskRecord::normalize)
            .collect::<Result<Vec<_>, _>>()?;
        let lists = lists
            .into_iter()
            .map(ListRecord::normalize)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::seeded(tasks, lists))
    }
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().unwrap_or(0) + 1
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn get(&self, id: u32) -> Result<Task, StoreError> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::TaskNotFound(id))
    }

    async fn create(&self, new: NewTask) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let id = next_id(tasks.iter().map(|t| t.id));
        let task = client::build_task(new, id, Utc::now())?;
        tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: u32, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        client::apply_task_patch(task, patch, Utc::now())?;
        Ok(task.clone())
    }

    async fn delete(&self, id: u32) -> Result<(), StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(StoreError::TaskNotFound(id));
        }
        Ok(())
    }

    async fn toggle_complete(&self, id: u32) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        let completed = !task.completed;
        client::set_completed(task, completed, Utc::now());
        Ok(task.clone())
    }

    async fn restore(&self, id: u32) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        client::set_completed(task, false, Utc::now());
        Ok(task.clone())
    }
}

#[async_trait]
impl ListStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<List>, StoreError> {
        Ok(self.lists.lock().unwrap().clone())
    }

    async fn get(&self, id: u32) -> Result<List, StoreError> {
        self.lists
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(StoreError::ListNotFound(id))
    }

    async fn create(&self, new: NewList) -> Result<List, StoreError> {
        let mut lists = self.lists.lock().unwrap();
        let id = next_id(lists.iter().map(|l| l.id));
        let list = client::build_list(new, id, Utc::now())?;
        lists.push(list.clone());
        Ok(list)
    }

    async fn update(&self, id: u32, patch: ListPatch) -> Result<List, StoreError> {
        let mut lists = self.lists.lock().unwrap();
        let list = lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::ListNotFound(id))?;
        client::apply_list_patch(list, patch)?;
        Ok(list.clone())
    }

    async fn delete(&self, id: u32) -> Result<(), StoreError> {
        let mut lists = self.lists.lock().unwrap();
        let before = lists.len();
        lists.retain(|l| l.id != id);
        if lists.len() == before {
            return Err(StoreError::ListNotFound(id));
        }
        Ok(())
    }
}

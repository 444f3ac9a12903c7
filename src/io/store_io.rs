//! JSON-file-backed store implementation.
//!
//! Tasks and lists live in `tasks.json` and `lists.json` under the data
//! directory. Files are read through the wire-record normalization layer, so
//! data written by either naming convention loads cleanly, and are written
//! back in the canonical shape via an atomic temp-file + rename.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::model::list::List;
use crate::model::task::Task;
use crate::store::client::{
    self, ListPatch, ListStore, NewList, NewTask, TaskPatch, TaskStore,
};
use crate::store::error::StoreError;
use crate::store::record::{ListRecord, TaskRecord};

const TASKS_FILE: &str = "tasks.json";
const LISTS_FILE: &str = "lists.json";

// Lock poisoning is not recovered from: a panic mid-mutation leaves the
// in-memory copy out of sync with the files, so the `lock().unwrap()` calls
// below propagate it.
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    tasks: Mutex<Vec<Task>>,
    lists: Mutex<Vec<List>>,
}

impl JsonFileStore {
    /// Open (or initialize) the store under the given data directory.
    /// Missing files start the corresponding collection empty.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;

        let tasks = load_collection::<TaskRecord>(&data_dir.join(TASKS_FILE))?
            .into_iter()
            .map(TaskRecord::normalize)
            .collect::<Result<Vec<_>, _>>()?;
        let lists = load_collection::<ListRecord>(&data_dir.join(LISTS_FILE))?
            .into_iter()
            .map(ListRecord::normalize)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            dir = %data_dir.display(),
            tasks = tasks.len(),
            lists = lists.len(),
            "opened json file store"
        );

        Ok(JsonFileStore {
            data_dir: data_dir.to_path_buf(),
            tasks: Mutex::new(tasks),
            lists: Mutex::new(lists),
        })
    }

    fn persist<T: Serialize>(&self, file: &str, items: &[T]) -> Result<(), StoreError> {
        let path = self.data_dir.join(file);
        let content = serde_json::to_string_pretty(items)?;
        atomic_write(&path, content.as_bytes())?;
        Ok(())
    }
}

fn load_collection<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl TaskStore for JsonFileStore {
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
        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = client::build_task(new, id, Utc::now())?;
        tasks.push(task.clone());
        self.persist(TASKS_FILE, &tasks)?;
        Ok(task)
    }

    async fn update(&self, id: u32, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        client::apply_task_patch(task, patch, Utc::now())?;
        let updated = task.clone();
        self.persist(TASKS_FILE, &tasks)?;
        Ok(updated)
    }

    async fn delete(&self, id: u32) -> Result<(), StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(StoreError::TaskNotFound(id));
        }
        self.persist(TASKS_FILE, &tasks)?;
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
        let updated = task.clone();
        self.persist(TASKS_FILE, &tasks)?;
        Ok(updated)
    }

    async fn restore(&self, id: u32) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        client::set_completed(task, false, Utc::now());
        let updated = task.clone();
        self.persist(TASKS_FILE, &tasks)?;
        Ok(updated)
    }
}

#[async_trait]
impl ListStore for JsonFileStore {
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
        let id = lists.iter().map(|l| l.id).max().unwrap_or(0) + 1;
        let list = client::build_list(new, id, Utc::now())?;
        lists.push(list.clone());
        self.persist(LISTS_FILE, &lists)?;
        Ok(list)
    }

    async fn update(&self, id: u32, patch: ListPatch) -> Result<List, StoreError> {
        let mut lists = self.lists.lock().unwrap();
        let list = lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::ListNotFound(id))?;
        client::apply_list_patch(list, patch)?;
        let updated = list.clone();
        self.persist(LISTS_FILE, &lists)?;
        Ok(updated)
    }

    async fn delete(&self, id: u32) -> Result<(), StoreError> {
        let mut lists = self.lists.lock().unwrap();
        let before = lists.len();
        lists.retain(|l| l.id != id);
        if lists.len() == before {
            return Err(StoreError::ListNotFound(id));
        }
        self.persist(LISTS_FILE, &lists)?;
        Ok(())
    }
}

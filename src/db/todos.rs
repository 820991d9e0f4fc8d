//! File-backed todo store.
//!
//! [`TodoStore`] is the single owner of the todo list. The list lives in
//! memory behind one `RwLock` and is mirrored to a JSON file that is
//! rewritten in full on every mutation.
//!
//! ## Consistency
//!
//! Each mutation holds the write lock across its whole read-modify-persist
//! sequence and works on a copy of the list. The copy replaces the live list
//! only after it has been written to disk, so a failed write leaves both the
//! file and memory as they were. Readers take the read lock and always see a
//! fully committed list.
//!
//! ## File replacement
//!
//! The new content is written to a sibling `*.tmp` file, synced, and renamed
//! over the target, so a crash mid-write never leaves a truncated store.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todomvc::db::todos::TodoStore;
//! use todomvc::libs::todo::TodoStatus;
//!
//! let store = TodoStore::open("todo.json")?;
//! let mut todo = store.add("buy milk")?;
//! todo.status = TodoStatus::Completed;
//! store.update(&todo)?;
//! store.bulk_delete(&[todo.id].into_iter().collect())?;
//! # Ok::<(), todomvc::libs::error::TodoError>(())
//! ```

use crate::libs::error::{Result, TodoError};
use crate::libs::messages::Message;
use crate::libs::todo::{is_blank, Todo, TodoStatus};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

struct TodoList {
    todos: Vec<Todo>,
    /// Next id to hand out. Only ever grows, so ids freed by deletion are not reused.
    next_id: i64,
}

pub struct TodoStore {
    path: PathBuf,
    list: RwLock<TodoList>,
}

impl TodoStore {
    /// Opens the store backed by `path`.
    ///
    /// A missing or blank file yields an empty store; the file itself is only
    /// created by the first mutation. A file that cannot be parsed, or that
    /// holds duplicate ids or an id of `i64::MAX`, is rejected with [`TodoError::CorruptStore`].
    pub fn open(path: impl Into<PathBuf>) -> Result<TodoStore> {
        let path = path.into();
        let todos = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => Self::parse(&path, &raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("{}", Message::StoreCreatedEmpty(path.display().to_string()));
                Vec::new()
            }
            Err(e) => return Err(TodoError::Persistence(e)),
        };

        let max_id = todos.iter().map(|todo| todo.id).max().unwrap_or(0);
        let next_id = max_id.checked_add(1).ok_or_else(|| TodoError::CorruptStore {
            path: path.clone(),
            reason: format!("id {} leaves no room for new ids", max_id),
        })?;

        tracing::info!(
            "{}",
            Message::StoreOpened {
                path: path.display().to_string(),
                count: todos.len(),
            }
        );
        Ok(TodoStore {
            path,
            list: RwLock::new(TodoList { todos, next_id }),
        })
    }

    fn parse(path: &Path, raw: &str) -> Result<Vec<Todo>> {
        let todos: Vec<Todo> = serde_json::from_str(raw).map_err(|e| TodoError::CorruptStore {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut seen = HashSet::with_capacity(todos.len());
        if let Some(dup) = todos.iter().find(|todo| !seen.insert(todo.id)) {
            return Err(TodoError::CorruptStore {
                path: path.to_path_buf(),
                reason: format!("duplicate id {}", dup.id),
            });
        }

        Ok(todos)
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a copy of every todo in creation order.
    pub fn read_all(&self) -> Vec<Todo> {
        self.list.read().todos.clone()
    }

    /// Returns a copy of the todos whose status equals `status`, in creation
    /// order. `None` returns the whole list.
    pub fn read_filtered(&self, status: Option<TodoStatus>) -> Vec<Todo> {
        let list = self.list.read();
        match status {
            Some(status) => list.todos.iter().filter(|todo| todo.status == status).cloned().collect(),
            None => list.todos.clone(),
        }
    }

    /// Appends a new active todo and returns it.
    ///
    /// Fails with [`TodoError::IdsExhausted`] once the last id below
    /// `i64::MAX` has been handed out.
    pub fn add(&self, content: &str) -> Result<Todo> {
        if is_blank(content) {
            return Err(TodoError::Validation(Message::ContentEmpty));
        }

        let mut list = self.list.write();
        let next_id = list.next_id.checked_add(1).ok_or(TodoError::IdsExhausted)?;
        let todo = Todo::new(list.next_id, content);

        let mut todos = list.todos.clone();
        todos.push(todo.clone());
        self.persist(&todos)?;

        list.todos = todos;
        list.next_id = next_id;
        tracing::debug!("{}", Message::TodoAdded(todo.id));
        Ok(todo)
    }

    /// Replaces the content and status of the todo with `todo.id`.
    pub fn update(&self, todo: &Todo) -> Result<()> {
        let mut list = self.list.write();
        let index = list.todos.iter().position(|t| t.id == todo.id).ok_or(TodoError::NotFound(todo.id))?;

        let mut todos = list.todos.clone();
        todos[index].content = todo.content.clone();
        todos[index].status = todo.status;
        self.persist(&todos)?;

        list.todos = todos;
        tracing::debug!("{}", Message::TodoUpdated(todo.id));
        Ok(())
    }

    /// Removes every todo whose id is in `ids` and returns how many were
    /// removed. Unknown ids are ignored. An empty set does not touch the file.
    pub fn bulk_delete(&self, ids: &HashSet<i64>) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut list = self.list.write();
        let todos: Vec<Todo> = list.todos.iter().filter(|todo| !ids.contains(&todo.id)).cloned().collect();
        let removed = list.todos.len() - todos.len();
        self.persist(&todos)?;

        list.todos = todos;
        tracing::debug!("{}", Message::TodosDeleted(removed));
        Ok(removed)
    }

    fn persist(&self, todos: &[Todo]) -> Result<()> {
        let data = serde_json::to_vec_pretty(todos)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp_name = self.path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let result = Self::write_file(&tmp_path, &data).and_then(|_| fs::rename(&tmp_path, &self.path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(TodoError::Persistence(e));
        }
        Ok(())
    }

    fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(data)?;
        file.sync_all()
    }
}

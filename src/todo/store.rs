use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use std::path::Path;
use std::sync::Mutex;

use crate::internal_error::{InternalError, InternalResult};

use super::data::*;

/// Everything the handlers need from persistence.
pub trait TodoStore: Send + Sync {
    /// Every todo, oldest first.
    fn list(&self) -> InternalResult<Vec<Todo>>;

    fn get(&self, id: TodoID) -> InternalResult<Todo>;

    fn create(&self, new: NewTodo) -> InternalResult<Todo>;

    /// Writes back every mutable field of `todo`.
    fn update(&self, todo: &Todo) -> InternalResult<()>;

    fn delete(&self, id: TodoID) -> InternalResult<()>;
}

pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> InternalResult<SqliteStore> {
        SqliteStore::new(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> InternalResult<SqliteStore> {
        SqliteStore::new(Connection::open_in_memory()?)
    }

    fn new(connection: Connection) -> InternalResult<SqliteStore> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                due_date TEXT,
                resolved INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            params![],
        )?;

        Ok(SqliteStore {
            connection: Mutex::new(connection),
        })
    }
}

const SELECT_TODO: &str =
    "SELECT id, title, description, due_date, resolved, created_at, updated_at FROM todos";

fn todo_from_row(row: &Row) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        resolved: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl TodoStore for SqliteStore {
    fn list(&self) -> InternalResult<Vec<Todo>> {
        let db_connection = self.connection.lock()?;

        let mut statement = db_connection.prepare(&format!("{} ORDER BY id", SELECT_TODO))?;
        let rows = statement.query_map(params![], todo_from_row)?;

        let mut todos = vec![];
        for row_result in rows {
            todos.push(row_result?);
        }

        Ok(todos)
    }

    fn get(&self, id: TodoID) -> InternalResult<Todo> {
        let db_connection = self.connection.lock()?;

        db_connection
            .query_row(
                &format!("{} WHERE id = (?1)", SELECT_TODO),
                params![id],
                todo_from_row,
            )
            .optional()?
            .ok_or(InternalError::NotFound(id))
    }

    fn create(&self, new: NewTodo) -> InternalResult<Todo> {
        let db_connection = self.connection.lock()?;
        let now = Utc::now();

        db_connection.execute(
            "INSERT INTO todos (title, description, due_date, resolved, created_at, updated_at)
            VALUES (?1, ?2, ?3, 0, ?4, ?4)",
            params![new.title, new.description, new.due_date, now],
        )?;

        Ok(Todo {
            id: db_connection.last_insert_rowid(),
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            resolved: false,
            created_at: now,
            updated_at: now,
        })
    }

    fn update(&self, todo: &Todo) -> InternalResult<()> {
        let db_connection = self.connection.lock()?;

        let changed = db_connection.execute(
            "UPDATE todos SET
            title = ?2,
            description = ?3,
            due_date = ?4,
            resolved = ?5,
            updated_at = ?6
            WHERE id = ?1",
            params![
                todo.id,
                todo.title,
                todo.description,
                todo.due_date,
                todo.resolved,
                todo.updated_at
            ],
        )?;

        if changed == 0 {
            return Err(InternalError::NotFound(todo.id));
        }

        Ok(())
    }

    fn delete(&self, id: TodoID) -> InternalResult<()> {
        let db_connection = self.connection.lock()?;

        let changed = db_connection.execute("DELETE FROM todos WHERE id = (?1)", params![id])?;

        if changed == 0 {
            return Err(InternalError::NotFound(id));
        }

        Ok(())
    }
}

/// Keeps todos in process memory; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: TodoID,
    todos: Vec<Todo>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl TodoStore for MemoryStore {
    fn list(&self) -> InternalResult<Vec<Todo>> {
        Ok(self.state.lock()?.todos.clone())
    }

    fn get(&self, id: TodoID) -> InternalResult<Todo> {
        self.state
            .lock()?
            .todos
            .iter()
            .find(|todo| todo.id == id)
            .cloned()
            .ok_or(InternalError::NotFound(id))
    }

    fn create(&self, new: NewTodo) -> InternalResult<Todo> {
        let mut state = self.state.lock()?;
        let now = Utc::now();

        state.last_id += 1;
        let todo = Todo {
            id: state.last_id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            resolved: false,
            created_at: now,
            updated_at: now,
        };
        state.todos.push(todo.clone());

        Ok(todo)
    }

    fn update(&self, todo: &Todo) -> InternalResult<()> {
        let mut state = self.state.lock()?;

        match state.todos.iter_mut().find(|stored| stored.id == todo.id) {
            Some(stored) => {
                *stored = Todo {
                    created_at: stored.created_at,
                    ..todo.clone()
                };
                Ok(())
            }
            None => Err(InternalError::NotFound(todo.id)),
        }
    }

    fn delete(&self, id: TodoID) -> InternalResult<()> {
        let mut state = self.state.lock()?;

        let position = state.todos.iter().position(|todo| todo.id == id);
        match position {
            Some(index) => {
                state.todos.remove(index);
                Ok(())
            }
            None => Err(InternalError::NotFound(id)),
        }
    }
}

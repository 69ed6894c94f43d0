use chrono::{DateTime, Duration, NaiveDate, Utc};
use rocket::FromForm;
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;

pub type TodoID = i64;

pub const TITLE_MAX_CHARS: usize = 200;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: TodoID,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Applies a validated update and refreshes `updated_at`.
    pub fn apply(&mut self, changes: TodoChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(resolved) = changes.resolved {
            self.resolved = resolved;
        }

        self.touch();
    }

    pub fn toggle(&mut self) {
        self.resolved = !self.resolved;
        self.touch();
    }

    /// `updated_at` never goes backwards or repeats, even when the clock
    /// resolution is coarser than two consecutive writes.
    pub fn touch(&mut self) {
        self.updated_at = next_timestamp(self.updated_at);
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// A record that passed the create ruleset. `resolved` starts false.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

/// A validated update; `None` leaves the stored field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
    pub resolved: Option<bool>,
}

/// Raw submitted form fields, before any ruleset runs.
#[derive(FromForm, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TodoForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub resolved: Option<String>,
}

impl From<&Todo> for TodoForm {
    fn from(todo: &Todo) -> TodoForm {
        TodoForm {
            title: Some(todo.title.clone()),
            description: Some(todo.description.clone()),
            due_date: todo.due_date.map(|date| date.format("%Y-%m-%d").to_string()),
            resolved: Some(todo.resolved.to_string()),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> FieldErrors {
        FieldErrors::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

/// What a page shows for its form: the values to fill in and any errors.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub values: TodoForm,
    pub errors: FieldErrors,
}

impl FormState {
    pub fn blank() -> FormState {
        FormState::default()
    }

    pub fn filled(values: TodoForm) -> FormState {
        FormState {
            values,
            errors: FieldErrors::new(),
        }
    }

    pub fn rejected(values: TodoForm, errors: FieldErrors) -> FormState {
        FormState { values, errors }
    }
}

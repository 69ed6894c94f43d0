//! One function per route. Each takes the submitted form (if any), the path
//! id (if any) and the store, and describes the response as a [`Reply`].

use serde::Serialize;

use crate::internal_error::InternalResult;

use super::data::*;
use super::store::TodoStore;
use super::validation::{validate_create, validate_update};

pub const LIST_ROUTE: &str = "/";

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Page {
    List { todos: Vec<Todo>, form: FormState },
    New { form: FormState },
    Edit { todo: Todo, form: FormState },
    ConfirmDelete { todo: Todo },
}

impl Page {
    pub fn template_name(&self) -> &'static str {
        match self {
            Page::List { .. } => "todo_list",
            Page::New { .. } | Page::Edit { .. } => "todo_form",
            Page::ConfirmDelete { .. } => "todo_confirm_delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Rendered with status 200.
    Page(Page),
    /// A 302 to the given path.
    Redirect(&'static str),
}

pub fn list(store: &dyn TodoStore) -> InternalResult<Reply> {
    Ok(Reply::Page(Page::List {
        todos: store.list()?,
        form: FormState::blank(),
    }))
}

pub fn create(form: TodoForm, store: &dyn TodoStore) -> InternalResult<Reply> {
    create_or_reject(form, store, |form| {
        Ok(Page::List {
            todos: store.list()?,
            form,
        })
    })
}

pub fn new_form() -> Reply {
    Reply::Page(Page::New {
        form: FormState::blank(),
    })
}

pub fn create_standalone(form: TodoForm, store: &dyn TodoStore) -> InternalResult<Reply> {
    create_or_reject(form, store, |form| Ok(Page::New { form }))
}

fn create_or_reject(
    form: TodoForm,
    store: &dyn TodoStore,
    rejected: impl FnOnce(FormState) -> InternalResult<Page>,
) -> InternalResult<Reply> {
    match validate_create(&form) {
        Ok(new) => {
            let todo = store.create(new)?;
            log::info!("created todo {} ({:?})", todo.id, todo.title);
            Ok(Reply::Redirect(LIST_ROUTE))
        }
        Err(errors) => {
            log::debug!("rejected new todo: {:?}", errors.fields().collect::<Vec<_>>());
            Ok(Reply::Page(rejected(FormState::rejected(form, errors))?))
        }
    }
}

pub fn edit_form(id: TodoID, store: &dyn TodoStore) -> InternalResult<Reply> {
    let todo = store.get(id)?;
    let form = FormState::filled(TodoForm::from(&todo));

    Ok(Reply::Page(Page::Edit { todo, form }))
}

pub fn update(id: TodoID, form: TodoForm, store: &dyn TodoStore) -> InternalResult<Reply> {
    let mut todo = store.get(id)?;

    match validate_update(&form) {
        Ok(changes) => {
            todo.apply(changes);
            store.update(&todo)?;
            log::info!("updated todo {}", id);
            Ok(Reply::Redirect(LIST_ROUTE))
        }
        Err(errors) => {
            log::debug!("rejected update of todo {}: {:?}", id, errors.fields().collect::<Vec<_>>());
            Ok(Reply::Page(Page::Edit {
                todo,
                form: FormState::rejected(form, errors),
            }))
        }
    }
}

pub fn confirm_delete(id: TodoID, store: &dyn TodoStore) -> InternalResult<Reply> {
    Ok(Reply::Page(Page::ConfirmDelete {
        todo: store.get(id)?,
    }))
}

pub fn delete(id: TodoID, store: &dyn TodoStore) -> InternalResult<Reply> {
    store.delete(id)?;
    log::info!("deleted todo {}", id);

    Ok(Reply::Redirect(LIST_ROUTE))
}

pub fn toggle(id: TodoID, store: &dyn TodoStore) -> InternalResult<Reply> {
    let mut todo = store.get(id)?;

    todo.toggle();
    store.update(&todo)?;
    log::info!("todo {} resolved = {}", id, todo.resolved);

    Ok(Reply::Redirect(LIST_ROUTE))
}

use rocket::form::Form;
use rocket::request::Request;
use rocket::response::{self, Redirect, Responder};
use rocket::serde::json::Json;
use rocket::{catch, get, post, State};
use rocket_dyn_templates::{context, Template};
use serde_json::{json, Value};

use crate::data::SharedStore;
use crate::internal_error::{InternalError, InternalResult};

use super::data::*;
use super::handlers::{self, Reply};

impl<'r> Responder<'r, 'static> for Reply {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        match self {
            Reply::Page(page) => Template::render(page.template_name(), &page).respond_to(request),
            Reply::Redirect(target) => Redirect::found(target).respond_to(request),
        }
    }
}

/// A path id as parsed by Rocket. Taking the parse result keeps a malformed
/// id on this route so it answers 404 like an unknown one, not 422.
/// Rocket hands back the raw segment on failure; re-parsing it recovers the
/// `ParseIntError` it discarded.
type RawID<'a> = Result<TodoID, &'a str>;

fn todo_id(id: RawID<'_>) -> InternalResult<TodoID> {
    id.map_err(|raw| InternalError::InvalidID(raw.parse::<TodoID>().unwrap_err()))
}

#[get("/")]
pub fn list_todos(store: &State<SharedStore>) -> InternalResult<Reply> {
    handlers::list(store.inner().as_ref())
}

#[post("/", data = "<form>")]
pub fn create_todo(form: Form<TodoForm>, store: &State<SharedStore>) -> InternalResult<Reply> {
    handlers::create(form.into_inner(), store.inner().as_ref())
}

#[get("/new")]
pub fn new_todo_form() -> Reply {
    handlers::new_form()
}

#[post("/new", data = "<form>")]
pub fn create_todo_standalone(
    form: Form<TodoForm>,
    store: &State<SharedStore>,
) -> InternalResult<Reply> {
    handlers::create_standalone(form.into_inner(), store.inner().as_ref())
}

#[get("/<id>/edit")]
pub fn edit_todo_form(id: RawID<'_>, store: &State<SharedStore>) -> InternalResult<Reply> {
    handlers::edit_form(todo_id(id)?, store.inner().as_ref())
}

#[post("/<id>/edit", data = "<form>")]
pub fn update_todo(
    id: RawID<'_>,
    form: Form<TodoForm>,
    store: &State<SharedStore>,
) -> InternalResult<Reply> {
    handlers::update(todo_id(id)?, form.into_inner(), store.inner().as_ref())
}

#[get("/<id>/delete")]
pub fn confirm_delete_todo(id: RawID<'_>, store: &State<SharedStore>) -> InternalResult<Reply> {
    handlers::confirm_delete(todo_id(id)?, store.inner().as_ref())
}

#[post("/<id>/delete")]
pub fn delete_todo(id: RawID<'_>, store: &State<SharedStore>) -> InternalResult<Reply> {
    handlers::delete(todo_id(id)?, store.inner().as_ref())
}

#[get("/<id>/toggle")]
pub fn toggle_todo(id: RawID<'_>, store: &State<SharedStore>) -> InternalResult<Reply> {
    handlers::toggle(todo_id(id)?, store.inner().as_ref())
}

#[get("/todos")]
pub fn get_todos(store: &State<SharedStore>) -> InternalResult<Json<Vec<Todo>>> {
    Ok(Json(store.list()?))
}

#[get("/todos/<id>")]
pub fn get_todo(id: RawID<'_>, store: &State<SharedStore>) -> InternalResult<Json<Todo>> {
    Ok(Json(store.get(todo_id(id)?)?))
}

#[catch(404)]
pub fn not_found(request: &Request) -> Template {
    Template::render(
        "404",
        context! {
            path: request.uri().path().to_string(),
        },
    )
}

#[catch(404)]
pub fn api_not_found(request: &Request) -> Json<Value> {
    Json(json!({
        "error": "not found",
        "path": request.uri().path().to_string(),
    }))
}

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

use std::error::Error;

mod config;
mod data;
mod internal_error;
mod todo;


use config::AppConfig;
use todo::endpoints;

#[macro_use]
extern crate rocket;

/// Rocket's usual configuration sources, with templates found next to the
/// crate unless `template_dir` is set explicitly.
pub fn figment() -> Figment {
    rocket::Config::figment().join((
        "template_dir",
        concat!(env!("CARGO_MANIFEST_DIR"), "/templates"),
    ))
}

pub fn build(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Template::fairing())
        .attach(AdHoc::try_on_ignite("Todo store", |rocket| async move {
            let extracted = rocket.figment().extract::<AppConfig>();
            let config = match extracted {
                Ok(config) => config,
                Err(e) => {
                    log::error!("invalid todo configuration: {}", e);
                    return Err(rocket);
                }
            };

            match config.open_store() {
                Ok(store) => {
                    log::info!("todo store: {:?} ({})", config.storage, config.database.display());
                    Ok(rocket.manage(store))
                }
                Err(e) => {
                    log::error!("could not open todo store: {}", e);
                    Err(rocket)
                }
            }
        }))
        .mount(
            "/",
            routes![
                endpoints::list_todos,
                endpoints::create_todo,
                endpoints::new_todo_form,
                endpoints::create_todo_standalone,
                endpoints::edit_todo_form,
                endpoints::update_todo,
                endpoints::confirm_delete_todo,
                endpoints::delete_todo,
                endpoints::toggle_todo,
            ],
        )
        .mount("/api", routes![endpoints::get_todos, endpoints::get_todo])
        .register("/", catchers![endpoints::not_found])
        .register("/api", catchers![endpoints::api_not_found])
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    build(figment()).launch().await?;

    Ok(())
}

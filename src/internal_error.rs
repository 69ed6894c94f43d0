use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use thiserror::Error;

use std::num::ParseIntError;
use std::sync::PoisonError;

use crate::todo::data::TodoID;

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("todo {0} does not exist")]
    NotFound(TodoID),
    #[error("malformed todo id: {0}")]
    InvalidID(#[source] ParseIntError),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("storage lock poisoned: {0}")]
    Poisoned(String),
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Poisoned(e.to_string())
    }
}

impl InternalError {
    pub fn status(&self) -> Status {
        match self {
            InternalError::NotFound(_) | InternalError::InvalidID(_) => Status::NotFound,
            InternalError::Storage(_) | InternalError::Poisoned(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        match &self {
            InternalError::NotFound(_) | InternalError::InvalidID(_) => log::debug!("{}", self),
            _ => log::error!("{}", self),
        }

        Err(self.status())
    }
}

pub type InternalResult<T> = Result<T, InternalError>;

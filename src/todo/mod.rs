pub mod data;
pub mod endpoints;
pub mod handlers;
pub mod store;
pub mod validation;

use crate::todo::store::TodoStore;

pub type SharedStore = Box<dyn TodoStore>;

pub mod tag;
pub mod todo;

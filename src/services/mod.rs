pub mod consistency;
pub mod tag;
pub mod todo;

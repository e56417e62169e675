//! Class lifecycle handlers.

mod cancel_class;
mod class_queries;
mod complete_class;
mod create_class;
mod delete_class;
mod update_class;

pub use cancel_class::{CancelClassCommand, CancelClassHandler};
pub use class_queries::ClassQueries;
pub use complete_class::{CompleteClassCommand, CompleteClassHandler};
pub use create_class::{CreateClassCommand, CreateClassHandler};
pub use delete_class::{DeleteClassCommand, DeleteClassHandler, DeleteClassOutcome};
pub use update_class::{UpdateClassCommand, UpdateClassHandler};

pub mod catalog;
pub mod column;
pub mod dispatcher;
pub mod fileset;
pub mod name;
pub mod output;

pub use dispatcher::{CommandDispatcher, Operation};
pub use output::Printer;

//! HTML template rendering handlers.

mod index;
mod list;

pub use index::index_handler;
pub use list::list_handler;

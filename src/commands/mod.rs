pub mod clipboard;
pub mod query_history;
pub mod view;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_support;

pub use clipboard::*;
pub use query_history::*;
pub use view::*;
pub use viewer::*;

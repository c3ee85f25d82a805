pub mod connection;
pub mod notification;
pub mod query_history;
pub mod session;
pub mod settings;
pub mod view;

pub use connection::*;
pub use notification::*;
pub use query_history::*;
pub use session::*;
pub use settings::*;
pub use view::*;

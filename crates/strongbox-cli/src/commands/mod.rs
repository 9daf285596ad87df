//! Command handlers, one module per subcommand.

mod create;
mod get;
mod init;
mod list;
mod misc;
mod rotate;

pub use create::handle_create;
pub use get::handle_get;
pub use init::handle_init;
pub use list::handle_list;
pub use misc::handle_completions;
pub use rotate::handle_rotate;

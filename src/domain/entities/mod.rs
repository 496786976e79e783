//! Domain entities - Core business objects

pub mod command;
pub mod interaction;
pub mod reply;

pub use command::{Command, CommandContext, CommandHandler, CommandRegistry, OptionSpec};
pub use interaction::{CommandOption, Interaction};
pub use reply::CommandResult;

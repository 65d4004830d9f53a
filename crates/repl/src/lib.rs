#![forbid(unsafe_code)]

pub mod command;
pub mod console;
pub mod interpreter;

pub use command::{Command, CommandError};
pub use console::{Console, LineConsole, Style};
pub use interpreter::Interpreter;

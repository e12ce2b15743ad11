//! Inverso Engine - history management
//!
//! Wraps finalized edit logs into undoable commands and keeps them on a
//! bounded undo stack.

pub mod commands;
pub mod config;
pub mod session;
pub mod stack;

pub use commands::{
    Command, CommandArg, CommandArgs, CommandRegistry, CommandResult, CommandStatus,
    UndoInverseCommand, UndoableCommand,
};
pub use config::{parse_config_file, parse_config_str, UndoConfig};
pub use session::UndoSession;
pub use stack::UndoStack;

//! Command protocol and the commands shipped with the engine.

pub mod command;
pub mod registry;
pub mod undo_inverse;

pub use command::{
    Command, CommandArg, CommandArgs, CommandResult, CommandStatus, UndoableCommand,
};
pub use registry::{CommandFactory, CommandRegistry};
pub use undo_inverse::{UndoInverseCommand, UNDO_INVERSE_COMMAND};

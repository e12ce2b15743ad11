//! Generic command protocol
//!
//! Commands take positional [`CommandArgs`] and report a [`CommandResult`].
//! Undoable commands additionally replay themselves backwards and forwards
//! and may absorb a later command of the same name.

use inverso_core::{DocumentPath, EditLogHandle};

/// One positional command argument
#[derive(Debug, Clone)]
pub enum CommandArg {
    EditLog(EditLogHandle),
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Path(DocumentPath),
}

impl CommandArg {
    pub fn type_name(&self) -> &'static str {
        match self {
            CommandArg::EditLog(_) => "edit_log",
            CommandArg::Bool(_) => "bool",
            CommandArg::Int(_) => "int",
            CommandArg::Double(_) => "double",
            CommandArg::String(_) => "string",
            CommandArg::Path(_) => "path",
        }
    }
}

impl From<EditLogHandle> for CommandArg {
    fn from(handle: EditLogHandle) -> Self {
        CommandArg::EditLog(handle)
    }
}

impl From<bool> for CommandArg {
    fn from(value: bool) -> Self {
        CommandArg::Bool(value)
    }
}

impl From<i64> for CommandArg {
    fn from(value: i64) -> Self {
        CommandArg::Int(value)
    }
}

impl From<f64> for CommandArg {
    fn from(value: f64) -> Self {
        CommandArg::Double(value)
    }
}

impl From<&str> for CommandArg {
    fn from(value: &str) -> Self {
        CommandArg::String(value.to_string())
    }
}

impl From<String> for CommandArg {
    fn from(value: String) -> Self {
        CommandArg::String(value)
    }
}

impl From<DocumentPath> for CommandArg {
    fn from(path: DocumentPath) -> Self {
        CommandArg::Path(path)
    }
}

/// Ordered argument list
#[derive(Debug, Clone, Default)]
pub struct CommandArgs {
    args: Vec<CommandArg>,
}

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument (builder style)
    pub fn arg(mut self, arg: impl Into<CommandArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn push(&mut self, arg: impl Into<CommandArg>) {
        self.args.push(arg.into());
    }

    pub fn get(&self, index: usize) -> Option<&CommandArg> {
        self.args.get(index)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn edit_log(&self, index: usize) -> Option<&EditLogHandle> {
        match self.args.get(index) {
            Some(CommandArg::EditLog(handle)) => Some(handle),
            _ => None,
        }
    }

    pub fn bool(&self, index: usize) -> Option<bool> {
        match self.args.get(index) {
            Some(CommandArg::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn int(&self, index: usize) -> Option<i64> {
        match self.args.get(index) {
            Some(CommandArg::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Doubles, with ints widened
    pub fn double(&self, index: usize) -> Option<f64> {
        match self.args.get(index) {
            Some(CommandArg::Double(value)) => Some(*value),
            Some(CommandArg::Int(value)) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn string(&self, index: usize) -> Option<&str> {
        match self.args.get(index) {
            Some(CommandArg::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn path(&self, index: usize) -> Option<&DocumentPath> {
        match self.args.get(index) {
            Some(CommandArg::Path(path)) => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failed,
    InvalidArg,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            status: CommandStatus::Success,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Failed,
            message: Some(message.into()),
        }
    }

    pub fn invalid_arg(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::InvalidArg,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }
}

/// A named, executable command
pub trait Command {
    fn name(&self) -> &str;

    fn execute(&mut self, args: &CommandArgs) -> CommandResult;
}

/// A command that can be replayed backwards and forwards
pub trait UndoableCommand: Command {
    fn undo(&mut self) -> bool;

    fn redo(&mut self) -> bool;

    /// Absorb `other` into `self`. Only called for commands of the same name.
    fn merge_with(&mut self, _other: &dyn UndoableCommand) -> bool {
        false
    }
}

//! Name → factory lookup for undoable commands

use super::command::{CommandArgs, CommandResult, UndoableCommand};
use super::undo_inverse::{UndoInverseCommand, UNDO_INVERSE_COMMAND};
use inverso_core::errors::{InversoError, Result};
use inverso_core::{log_op_end, log_op_error, log_op_start};
use std::collections::BTreeMap;
use std::time::Instant;

pub type CommandFactory = Box<dyn Fn() -> Box<dyn UndoableCommand>>;

#[derive(Default)]
pub struct CommandRegistry {
    factories: BTreeMap<String, CommandFactory>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the engine's built-in commands
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(UNDO_INVERSE_COMMAND, || {
            Box::new(UndoInverseCommand::new()) as Box<dyn UndoableCommand>
        });
        registry
    }

    /// Register a factory; returns false if the name was already taken
    /// (the new factory replaces the old one).
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> bool
    where
        F: Fn() -> Box<dyn UndoableCommand> + 'static,
    {
        self.factories
            .insert(name.into(), Box::new(factory))
            .is_none()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn UndoableCommand>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| InversoError::UnknownCommand {
                name: name.to_string(),
            })
    }

    /// Create and execute a command in one step
    ///
    /// # Errors
    ///
    /// `UnknownCommand` if nothing is registered under `name`. Command-level
    /// failures are reported through the returned [`CommandResult`].
    pub fn execute(
        &self,
        name: &str,
        args: &CommandArgs,
    ) -> Result<(Box<dyn UndoableCommand>, CommandResult)> {
        let start = Instant::now();
        log_op_start!("execute_command", command = name);

        let mut command = match self.create(name) {
            Ok(command) => command,
            Err(e) => {
                log_op_error!(
                    "execute_command",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                return Err(e);
            }
        };
        let result = command.execute(args);

        log_op_end!(
            "execute_command",
            duration_ms = start.elapsed().as_millis() as u64,
            command = name,
            success = result.is_success()
        );
        Ok((command, result))
    }
}

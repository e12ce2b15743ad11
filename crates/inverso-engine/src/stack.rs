//! Bounded undo/redo history
//!
//! Commands live in a deque with a cursor: everything before the cursor can
//! be undone, everything from it onward can be redone. Pushing truncates the
//! redo tail. At the limit the oldest command is evicted.

use crate::commands::UndoableCommand;
use inverso_core::{log_op_end, log_op_start};
use std::collections::VecDeque;
use std::time::Instant;

/// Default history length when nothing is configured
pub const DEFAULT_UNDO_LIMIT: usize = 100;

pub struct UndoStack {
    commands: VecDeque<Box<dyn UndoableCommand>>,
    index: usize,
    undo_limit: usize,
    enabled: bool,
}

impl std::fmt::Debug for UndoStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoStack")
            .field("len", &self.commands.len())
            .field("index", &self.index)
            .field("undo_limit", &self.undo_limit)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl UndoStack {
    /// A limit of 0 keeps every command
    pub fn new(undo_limit: usize) -> Self {
        Self {
            commands: VecDeque::new(),
            index: 0,
            undo_limit,
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling drops the whole history
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear();
        }
    }

    pub fn undo_limit(&self) -> usize {
        self.undo_limit
    }

    /// Trim the oldest commands down to `limit` (0 = unlimited)
    pub fn set_undo_limit(&mut self, limit: usize) {
        self.undo_limit = limit;
        if limit == 0 || self.commands.len() <= limit {
            return;
        }
        let excess = self.commands.len() - limit;
        self.commands.drain(..excess);
        self.index = self.index.saturating_sub(excess);
        tracing::debug!(
            component = module_path!(),
            op = "set_undo_limit",
            limit = limit,
            evicted = excess,
            "Undo history trimmed"
        );
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Cursor position: the number of commands that can be undone
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn can_undo(&self) -> bool {
        self.index != 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.commands.len()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.index = 0;
    }

    /// Name of the command the next `undo()` replays
    pub fn undo_name(&self) -> Option<&str> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.commands.get(i))
            .map(|cmd| cmd.name())
    }

    /// Name of the command the next `redo()` replays
    pub fn redo_name(&self) -> Option<&str> {
        self.commands.get(self.index).map(|cmd| cmd.name())
    }

    /// Add a command to the history
    ///
    /// With `execute` the command is run forward first via `redo()`. Commands
    /// already applied (such as a freshly recorded edit log) are pushed with
    /// `execute = false`.
    pub fn push(&mut self, mut command: Box<dyn UndoableCommand>, execute: bool) {
        if execute && !command.redo() {
            tracing::warn!(
                component = module_path!(),
                op = "push",
                command = command.name(),
                "Command failed while executing on push"
            );
        }
        if !self.enabled {
            return;
        }

        if self.index == self.commands.len() && self.index > 0 {
            if let Some(last) = self.commands.back_mut() {
                if last.name() == command.name() && last.merge_with(command.as_ref()) {
                    tracing::debug!(
                        component = module_path!(),
                        op = "push",
                        command = command.name(),
                        "Merged into previous command"
                    );
                    return;
                }
            }
        }

        self.commands.truncate(self.index);
        if self.undo_limit != 0 && self.commands.len() == self.undo_limit {
            self.commands.pop_front();
        } else {
            self.index += 1;
        }
        self.commands.push_back(command);
    }

    /// Undo the command before the cursor; false if there is none or it
    /// failed. The cursor moves either way.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        let start = Instant::now();
        let Some(command) = self.commands.get_mut(self.index) else {
            return false;
        };
        log_op_start!("stack_undo", command = command.name(), index = self.index);
        let ok = command.undo();
        log_op_end!(
            "stack_undo",
            duration_ms = start.elapsed().as_millis() as u64,
            success = ok
        );
        ok
    }

    /// Redo the command at the cursor; false if there is none or it failed.
    pub fn redo(&mut self) -> bool {
        let start = Instant::now();
        let Some(command) = self.commands.get_mut(self.index) else {
            return false;
        };
        log_op_start!("stack_redo", command = command.name(), index = self.index);
        let ok = command.redo();
        self.index += 1;
        log_op_end!(
            "stack_redo",
            duration_ms = start.elapsed().as_millis() as u64,
            success = ok
        );
        ok
    }
}

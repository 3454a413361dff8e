use super::Command;
use crate::document::Document;

/// Manages the history of executed commands for undo/redo functionality
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command and record it. Any redoable commands are discarded.
    pub fn execute(&mut self, command: Command, document: &mut Document) {
        command.execute(document);
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Undo the last executed command, returning its name if there was one
    pub fn undo(&mut self, document: &mut Document) -> Option<&'static str> {
        let command = self.undo_stack.pop()?;
        command.undo(document);
        let name = command.name();
        self.redo_stack.push(command);
        Some(name)
    }

    /// Redo the last undone command, returning its name if there was one
    pub fn redo(&mut self, document: &mut Document) -> Option<&'static str> {
        let command = self.redo_stack.pop()?;
        command.execute(document);
        let name = command.name();
        self.undo_stack.push(command);
        Some(name)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

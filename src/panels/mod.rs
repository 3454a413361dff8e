mod save_dialog;
mod toolbar;

pub use save_dialog::{SaveDialog, default_name, validate_name};
pub use toolbar::{ToolbarAction, ToolbarView, shortcut_actions};

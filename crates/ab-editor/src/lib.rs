pub mod config;
pub mod controller;
pub mod editor;
pub mod guides;
pub mod history;
pub mod input;
pub mod shortcuts;

pub use config::EditorConfig;
pub use controller::{Controller, Outcome, View};
pub use editor::Editor;
pub use guides::{compute_guides, snap_offset};
pub use history::History;
pub use input::{InputEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};

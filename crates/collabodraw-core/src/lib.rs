//! CollaboDraw Core Library
//!
//! Platform-agnostic data structures and logic for the CollaboDraw whiteboard:
//! the element model, element store, undo/redo history, view transform,
//! tools, selection, and local persistence.

pub mod board;
pub mod elements;
pub mod history;
pub mod presence;
pub mod selection;
pub mod storage;
pub mod store;
pub mod time;
pub mod timer;
pub mod tools;
pub mod viewport;

pub use board::{Board, BoardSettings, DEFAULT_BOARD_NAME};
pub use elements::{Element, ElementId, ElementTrait, HexColor};
pub use history::{History, HistoryEntry, MAX_UNDO_HISTORY};
pub use presence::{Change, Presence, User};
pub use selection::{Clipboard, ContentEdit, MultiMoveState, Selection};
pub use store::ElementStore;
pub use timer::SessionTimer;
pub use tools::{GestureUpdate, ToolKind, ToolManager};
pub use viewport::Viewport;

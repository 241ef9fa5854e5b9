//! CollaboDraw Application
//!
//! The session layer tying the element store, drawing engine, persistence
//! and periodic tasks together behind a single controller.

mod config;
mod controller;
pub mod navigation;
mod scheduler;
mod shortcuts;

pub use config::{AppConfig, ConfigError};
pub use controller::{
    BoardController, ControllerError, ExportedImage, Notification, NotificationKind, PointerOutcome,
};
pub use navigation::NavigationParams;
pub use scheduler::{Scheduler, Task};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebBoard, run_wasm};

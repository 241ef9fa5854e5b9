//! Keyboard shortcut registry and dispatch.

use collabodraw_core::ToolKind;

/// What a key press asks the board to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    SelectTool(ToolKind),
    Undo,
    Redo,
    Save,
    Copy,
    Paste,
    Duplicate,
    SelectAll,
    Delete,
    Cancel,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ShowHelp,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("V", false, false, "Select tool"),
            Shortcut::new("Space", false, false, "Hand tool"),
            Shortcut::new("P", false, false, "Pen"),
            Shortcut::new("H", false, false, "Highlighter"),
            Shortcut::new("R", false, false, "Rectangle"),
            Shortcut::new("O", false, false, "Circle"),
            Shortcut::new("L", false, false, "Line"),
            Shortcut::new("A", false, false, "Arrow"),
            Shortcut::new("T", false, false, "Text"),
            Shortcut::new("S", false, false, "Sticky note"),
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("S", true, false, "Save board"),
            Shortcut::new("A", true, false, "Select all"),
            Shortcut::new("C", true, false, "Copy selection"),
            Shortcut::new("V", true, false, "Paste"),
            Shortcut::new("D", true, false, "Duplicate selection"),
            Shortcut::new("Delete", false, false, "Delete selection (clears the board when nothing is selected)"),
            Shortcut::new("Backspace", false, false, "Delete selection"),
            Shortcut::new("Escape", false, false, "Cancel current action"),
            Shortcut::new("+", false, false, "Zoom in"),
            Shortcut::new("-", false, false, "Zoom out"),
            Shortcut::new("0", false, false, "Reset zoom"),
            Shortcut::new("F1", false, false, "Show shortcuts"),
        ]
    }

    /// One formatted line per shortcut.
    pub fn help_lines() -> Vec<String> {
        Self::all()
            .iter()
            .map(|shortcut| format!("{:12} {}", shortcut.format(), shortcut.description))
            .collect()
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for line in Self::help_lines() {
            println!("  {}", line);
        }
        println!();
    }

    /// Map a key press to an action.
    ///
    /// `key` is the key's text (`"z"`, `"+"`) or its name (`"Delete"`,
    /// `"Escape"`, `"F1"`, `" "` or `"Space"`). Letters match either case.
    pub fn resolve(key: &str, ctrl: bool, shift: bool) -> Option<ShortcutAction> {
        let lower = key.to_lowercase();
        if ctrl {
            return match lower.as_str() {
                "z" if shift => Some(ShortcutAction::Redo),
                "z" => Some(ShortcutAction::Undo),
                "y" => Some(ShortcutAction::Redo),
                "s" => Some(ShortcutAction::Save),
                "a" => Some(ShortcutAction::SelectAll),
                "c" => Some(ShortcutAction::Copy),
                "v" => Some(ShortcutAction::Paste),
                "d" => Some(ShortcutAction::Duplicate),
                _ => None,
            };
        }

        if let Some(tool) = ToolKind::from_key(&lower) {
            return Some(ShortcutAction::SelectTool(tool));
        }
        match lower.as_str() {
            "delete" | "backspace" => Some(ShortcutAction::Delete),
            "escape" => Some(ShortcutAction::Cancel),
            "+" | "=" => Some(ShortcutAction::ZoomIn),
            "-" => Some(ShortcutAction::ZoomOut),
            "0" => Some(ShortcutAction::ResetZoom),
            "f1" => Some(ShortcutAction::ShowHelp),
            _ => None,
        }
    }
}

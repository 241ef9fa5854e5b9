//! Board document: name, elements and view/tool settings.

use crate::elements::HexColor;
use crate::store::ElementStore;
use crate::tools::ToolKind;
use crate::viewport::Viewport;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Name given to boards that were never named.
pub const DEFAULT_BOARD_NAME: &str = "Untitled Board";

fn default_board_name() -> String {
    DEFAULT_BOARD_NAME.to_string()
}

/// View and tool state persisted alongside the elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub zoom: f64,
    pub pan: Vec2,
    /// Session timer seconds.
    pub timer: u64,
    pub tool: ToolKind,
    pub color: HexColor,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            timer: 0,
            tool: ToolKind::default(),
            color: HexColor::black(),
        }
    }
}

impl BoardSettings {
    /// Viewport described by these settings (zoom clamped).
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.zoom, self.pan)
    }

    pub fn set_viewport(&mut self, viewport: &Viewport) {
        self.zoom = viewport.zoom;
        self.pan = viewport.pan;
    }
}

/// A named whiteboard as persisted to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default = "default_board_name")]
    pub name: String,
    #[serde(default)]
    pub elements: ElementStore,
    #[serde(default)]
    pub settings: BoardSettings,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_NAME)
    }
}

impl Board {
    /// Create an empty board.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: ElementStore::new(),
            settings: BoardSettings::default(),
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

//! Sticky note element.

use super::text::greek;
use super::{ElementId, ElementTrait, HexColor};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STICKY_WIDTH: f64 = 200.0;
pub const STICKY_HEIGHT: f64 = 150.0;

/// Title given to freshly placed notes.
pub const DEFAULT_STICKY_TITLE: &str = "New Note";
/// Background of freshly placed notes.
pub const DEFAULT_STICKY_COLOR: HexColor = HexColor::rgb(0xfe, 0xf0, 0x8a);

const PADDING: f64 = 12.0;
const TITLE_FONT_SIZE: f64 = 14.0;
const CONTENT_FONT_SIZE: f64 = 12.0;

/// A fixed-size note with a title line and free-form content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickyNote {
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: ElementId,
    /// Top-left corner.
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Note background.
    pub color: HexColor,
    #[serde(default)]
    pub layer: i32,
}

impl StickyNote {
    /// Place an empty note with the default title and background.
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: position.x,
            y: position.y,
            title: DEFAULT_STICKY_TITLE.to_string(),
            content: String::new(),
            color: DEFAULT_STICKY_COLOR,
            layer: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + STICKY_WIDTH, self.y + STICKY_HEIGHT)
    }

    /// Border color, a darker shade of the background.
    pub fn border_color(&self) -> HexColor {
        self.color.darken(0.25)
    }

    /// Greeked cells for the title and content, clipped to the note.
    pub fn glyph_cells(&self) -> Vec<Rect> {
        let rect = self.rect();
        let inner = Rect::new(rect.x0 + PADDING, rect.y0 + PADDING, rect.x1 - PADDING, rect.y1 - PADDING);
        let title_origin = Point::new(inner.x0, inner.y0 + TITLE_FONT_SIZE);
        let content_origin = Point::new(inner.x0, title_origin.y + TITLE_FONT_SIZE * 1.5);
        greek(&self.title, title_origin, TITLE_FONT_SIZE)
            .into_iter()
            .chain(greek(&self.content, content_origin, CONTENT_FONT_SIZE))
            .filter(|cell| cell.x1 <= inner.x1 && cell.y1 <= inner.y1)
            .collect()
    }
}

impl ElementTrait for StickyNote {
    fn id(&self) -> ElementId {
        self.id
    }

    fn layer(&self) -> i32 {
        self.layer
    }

    fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }

    fn color(&self) -> HexColor {
        self.color
    }

    fn set_color(&mut self, color: HexColor) {
        self.color = color;
    }

    fn bounds(&self) -> Rect {
        self.rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.rect().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.rect().to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

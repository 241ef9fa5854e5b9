//! Text element.

use super::{ElementId, ElementTrait, HexColor};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font size used for new text elements.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
/// Advance width of one character relative to the font size.
pub const GLYPH_WIDTH_RATIO: f64 = 0.6;
/// Distance between baselines relative to the font size.
const LINE_HEIGHT_RATIO: f64 = 1.2;
/// Height of a greeked glyph cell relative to the font size.
const CELL_HEIGHT_RATIO: f64 = 0.7;

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

/// A text label anchored at its first baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: ElementId,
    /// Left edge.
    pub x: f64,
    /// Baseline of the first line.
    pub y: f64,
    pub text: String,
    pub color: HexColor,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub layer: i32,
}

impl Text {
    /// Create a new text element with the default font size.
    pub fn new(position: Point, text: String, color: HexColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: position.x,
            y: position.y,
            text,
            color,
            font_size: DEFAULT_FONT_SIZE,
            layer: 0,
        }
    }

    /// Builder method to set font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Placeholder cells for every visible character, in reading order.
    pub fn glyph_cells(&self) -> Vec<Rect> {
        greek(&self.text, self.position(), self.font_size)
    }
}

/// Lay out `text` as greeked glyph cells starting at baseline `origin`.
///
/// Each non-whitespace character becomes one cell
/// `GLYPH_WIDTH_RATIO * font_size` wide; whitespace only advances.
pub fn greek(text: &str, origin: Point, font_size: f64) -> Vec<Rect> {
    let advance = font_size * GLYPH_WIDTH_RATIO;
    let cell_height = font_size * CELL_HEIGHT_RATIO;
    text.lines()
        .enumerate()
        .flat_map(|(row, line)| {
            let baseline = origin.y + row as f64 * font_size * LINE_HEIGHT_RATIO;
            line.chars()
                .enumerate()
                .filter(|(_, c)| !c.is_whitespace())
                .map(move |(col, _)| {
                    let left = origin.x + col as f64 * advance;
                    // Leave a gap between neighbouring cells
                    Rect::new(left, baseline - cell_height, left + advance * 0.8, baseline)
                })
        })
        .collect()
}

impl ElementTrait for Text {
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
        let columns = self
            .text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let rows = self.text.lines().count().max(1);
        let width = columns as f64 * self.font_size * GLYPH_WIDTH_RATIO;
        let height = self.font_size + (rows - 1) as f64 * self.font_size * LINE_HEIGHT_RATIO;
        Rect::new(
            self.x,
            self.y - self.font_size,
            self.x + width,
            self.y - self.font_size + height,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.bounds().to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

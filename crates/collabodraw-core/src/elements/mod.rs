//! Element definitions for the whiteboard.

mod arrow;
mod circle;
mod line;
mod path;
mod rectangle;
mod sticky;
mod text;

pub use arrow::{ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH, Arrow, arrowhead};
pub use circle::Circle;
pub use line::Line;
pub use path::{HIGHLIGHTER_ALPHA, HIGHLIGHTER_WIDTH, PEN_WIDTH, Path, StrokeTool};
pub use rectangle::Rectangle;
pub use sticky::{DEFAULT_STICKY_COLOR, DEFAULT_STICKY_TITLE, STICKY_HEIGHT, STICKY_WIDTH, StickyNote};
pub use text::{DEFAULT_FONT_SIZE, GLYPH_WIDTH_RATIO, Text, greek};

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stroke width used for rectangles, circles, lines and arrows.
pub const SHAPE_STROKE_WIDTH: f64 = 2.0;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// RGBA8 color, serialized as a `#rrggbb` or `#rrggbbaa` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Darken the color by the given factor (0.0 = unchanged, 1.0 = black).
    pub fn darken(self, factor: f64) -> Self {
        let keep = 1.0 - factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f64::from(c) * keep).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::black()
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {0}")]
pub struct ParseColorError(pub String);

impl FromStr for HexColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError(s.to_string()))?;
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| ParseColorError(s.to_string()))
        };
        match hex.len() {
            3 => Ok(Self::rgb(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
            )),
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for HexColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Distance from a point to a line segment (a -> b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Common behavior of every element kind.
pub trait ElementTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Stacking layer (higher draws later).
    fn layer(&self) -> i32;

    /// Set the stacking layer.
    fn set_layer(&mut self, layer: i32);

    /// Primary color of the element.
    fn color(&self) -> HexColor;

    /// Replace the primary color.
    fn set_color(&mut self, color: HexColor);

    /// Bounding box in board coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in board coordinates) hits this element.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Outline geometry of the element.
    fn to_path(&self) -> BezPath;

    /// Move the element by a delta.
    fn translate(&mut self, delta: Vec2);
}

/// A placed whiteboard object.
///
/// Serialized with an internal `type` tag so persisted boards read as
/// `{"type": "rectangle", "startX": 10, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Path(Path),
    Rectangle(Rectangle),
    Circle(Circle),
    Line(Line),
    Arrow(Arrow),
    Text(Text),
    Sticky(StickyNote),
}

impl Element {
    /// Short lowercase kind name, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Path(_) => "path",
            Element::Rectangle(_) => "rectangle",
            Element::Circle(_) => "circle",
            Element::Line(_) => "line",
            Element::Arrow(_) => "arrow",
            Element::Text(_) => "text",
            Element::Sticky(_) => "sticky",
        }
    }

    fn as_trait(&self) -> &dyn ElementTrait {
        match self {
            Element::Path(e) => e,
            Element::Rectangle(e) => e,
            Element::Circle(e) => e,
            Element::Line(e) => e,
            Element::Arrow(e) => e,
            Element::Text(e) => e,
            Element::Sticky(e) => e,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ElementTrait {
        match self {
            Element::Path(e) => e,
            Element::Rectangle(e) => e,
            Element::Circle(e) => e,
            Element::Line(e) => e,
            Element::Arrow(e) => e,
            Element::Text(e) => e,
            Element::Sticky(e) => e,
        }
    }

    pub fn id(&self) -> ElementId {
        self.as_trait().id()
    }

    pub fn layer(&self) -> i32 {
        self.as_trait().layer()
    }

    pub fn set_layer(&mut self, layer: i32) {
        self.as_trait_mut().set_layer(layer);
    }

    pub fn color(&self) -> HexColor {
        self.as_trait().color()
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.as_trait_mut().set_color(color);
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_trait().hit_test(point, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_trait_mut().translate(delta);
    }

    /// Whether the element satisfies the store invariants.
    ///
    /// Paths need at least two points; every other kind is always valid.
    pub fn is_valid(&self) -> bool {
        match self {
            Element::Path(p) => p.points.len() >= 2,
            Element::Rectangle(_)
            | Element::Circle(_)
            | Element::Line(_)
            | Element::Arrow(_)
            | Element::Text(_)
            | Element::Sticky(_) => true,
        }
    }

    /// Regenerate the element's ID.
    /// Used when duplicating or pasting so clones never share an identity.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Element::Path(e) => e.id = new_id,
            Element::Rectangle(e) => e.id = new_id,
            Element::Circle(e) => e.id = new_id,
            Element::Line(e) => e.id = new_id,
            Element::Arrow(e) => e.id = new_id,
            Element::Text(e) => e.id = new_id,
            Element::Sticky(e) => e.id = new_id,
        }
    }

    /// Clone with a fresh ID, moved by `offset` on both axes.
    pub fn cloned_with_offset(&self, offset: f64) -> Self {
        let mut clone = self.clone();
        clone.regenerate_id();
        clone.translate(Vec2::new(offset, offset));
        clone
    }
}

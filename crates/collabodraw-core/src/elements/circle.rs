//! Circle element.

use super::{ElementId, ElementTrait, HexColor, SHAPE_STROKE_WIDTH};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An outlined circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: ElementId,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Stroke color.
    pub color: HexColor,
    #[serde(default)]
    pub layer: i32,
}

impl Circle {
    /// Create a circle.
    pub fn new(center: Point, radius: f64, color: HexColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            center_x: center.x,
            center_y: center.y,
            radius,
            color,
            layer: 0,
        }
    }

    /// Circle whose diameter is the drag from `anchor` to `end`.
    ///
    /// Center is the midpoint, radius half the Euclidean distance.
    pub fn from_drag(anchor: Point, end: Point, color: HexColor) -> Self {
        Self::new(anchor.midpoint(end), anchor.distance(end) / 2.0, color)
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }
}

impl ElementTrait for Circle {
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
        Rect::from_center_size(self.center(), (self.radius * 2.0, self.radius * 2.0))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = (point.distance(self.center()) - self.radius).abs();
        dist <= tolerance + SHAPE_STROKE_WIDTH / 2.0
    }

    fn to_path(&self) -> BezPath {
        KurboCircle::new(self.center(), self.radius).to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.center_x += delta.x;
        self.center_y += delta.y;
    }
}

//! Rectangle element.

use super::{ElementId, ElementTrait, HexColor, SHAPE_STROKE_WIDTH};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An outlined rectangle spanning the drag anchor and the release point.
///
/// The corners are kept as drawn (not normalized) so the record keeps the
/// gesture direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: ElementId,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    /// Stroke color.
    pub color: HexColor,
    #[serde(default)]
    pub layer: i32,
}

impl Rectangle {
    /// Create a rectangle from two corner points.
    pub fn from_corners(start: Point, end: Point, color: HexColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
            color,
            layer: 0,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }
}

impl ElementTrait for Rectangle {
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
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        // Outline only: hit on the border
        let reach = tolerance + SHAPE_STROKE_WIDTH / 2.0;
        let rect = self.as_rect();
        rect.inflate(reach, reach).contains(point) && !rect.inflate(-reach, -reach).contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.start_x += delta.x;
        self.start_y += delta.y;
        self.end_x += delta.x;
        self.end_y += delta.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_keeps_direction() {
        let rect = Rectangle::from_corners(
            Point::new(50.0, 40.0),
            Point::new(10.0, 10.0),
            HexColor::black(),
        );
        assert_eq!(rect.start(), Point::new(50.0, 40.0));
        assert_eq!(rect.as_rect(), Rect::new(10.0, 10.0, 50.0, 40.0));
    }

    #[test]
    fn test_hit_test_border_only() {
        let rect = Rectangle::from_corners(
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
            HexColor::black(),
        );
        assert!(rect.hit_test(Point::new(0.0, 50.0), 2.0));
        assert!(!rect.hit_test(Point::new(50.0, 50.0), 2.0));
    }
}

//! Straight line element.

use super::{ElementId, ElementTrait, HexColor, SHAPE_STROKE_WIDTH, point_to_segment_dist};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
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

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point, color: HexColor) -> Self {
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
}

impl ElementTrait for Line {
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
        Rect::from_points(self.start(), self.end())
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start(), self.end()) <= tolerance + SHAPE_STROKE_WIDTH / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start());
        path.line_to(self.end());
        path
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
    fn test_hit_test() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0), HexColor::black());
        assert!(line.hit_test(Point::new(50.0, 50.0), 1.0));
        assert!(!line.hit_test(Point::new(100.0, 0.0), 1.0));
    }

    #[test]
    fn test_translate() {
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), HexColor::black());
        line.translate(Vec2::new(5.0, 5.0));
        assert_eq!(line.start(), Point::new(5.0, 5.0));
        assert_eq!(line.end(), Point::new(15.0, 5.0));
    }
}

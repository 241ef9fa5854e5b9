//! Arrow element.

use super::{ElementId, ElementTrait, HexColor, SHAPE_STROKE_WIDTH, point_to_segment_dist};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use uuid::Uuid;

/// Length of each arrowhead barb.
pub const ARROW_HEAD_LENGTH: f64 = 15.0;
/// Angle between the shaft and each barb.
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

/// Compute the two barb end points of an arrowhead at `end`.
///
/// Each barb runs from `end` back along the shaft, rotated by
/// [`ARROW_HEAD_ANGLE`] to either side.
pub fn arrowhead(start: Point, end: Point) -> [Point; 2] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let barb = |theta: f64| {
        Point::new(
            end.x - ARROW_HEAD_LENGTH * theta.cos(),
            end.y - ARROW_HEAD_LENGTH * theta.sin(),
        )
    };
    [barb(angle - ARROW_HEAD_ANGLE), barb(angle + ARROW_HEAD_ANGLE)]
}

/// A straight arrow (shaft plus two-barb head at the end point).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
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

impl Arrow {
    /// Create a new arrow pointing at `end`.
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

    /// Barb end points of the head.
    pub fn head(&self) -> [Point; 2] {
        arrowhead(self.start(), self.end())
    }

    /// All stroked segments: the shaft first, then both barbs.
    pub fn segments(&self) -> [(Point, Point); 3] {
        let [left, right] = self.head();
        [
            (self.start(), self.end()),
            (self.end(), left),
            (self.end(), right),
        ]
    }
}

impl ElementTrait for Arrow {
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
        let [left, right] = self.head();
        Rect::from_points(self.start(), self.end())
            .union_pt(left)
            .union_pt(right)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + SHAPE_STROKE_WIDTH / 2.0;
        self.segments()
            .iter()
            .any(|(a, b)| point_to_segment_dist(point, *a, *b) <= reach)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for (a, b) in self.segments() {
            path.move_to(a);
            path.line_to(b);
        }
        path
    }

    fn translate(&mut self, delta: Vec2) {
        self.start_x += delta.x;
        self.start_y += delta.y;
        self.end_x += delta.x;
        self.end_y += delta.y;
    }
}

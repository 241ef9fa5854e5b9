//! Freehand path element (pen and highlighter strokes).

use super::{ElementId, ElementTrait, HexColor, point_to_polyline_dist};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pen stroke width.
pub const PEN_WIDTH: f64 = 2.0;
/// Highlighter stroke width.
pub const HIGHLIGHTER_WIDTH: f64 = 8.0;
/// Highlighter opacity.
pub const HIGHLIGHTER_ALPHA: f64 = 0.4;

/// Which freehand tool produced a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    #[default]
    Pen,
    Highlighter,
}

impl StrokeTool {
    /// Fixed stroke width for this tool.
    pub fn width(self) -> f64 {
        match self {
            StrokeTool::Pen => PEN_WIDTH,
            StrokeTool::Highlighter => HIGHLIGHTER_WIDTH,
        }
    }

    /// Fixed opacity for this tool, `None` meaning fully opaque.
    pub fn alpha(self) -> Option<f64> {
        match self {
            StrokeTool::Pen => None,
            StrokeTool::Highlighter => Some(HIGHLIGHTER_ALPHA),
        }
    }
}

/// A freehand stroke (ordered series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: ElementId,
    /// Points in the stroke, in drawing order.
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: HexColor,
    /// Stroke width.
    pub line_width: f64,
    /// Opacity (absent = 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// Tool that drew the stroke.
    #[serde(default)]
    pub tool: StrokeTool,
    #[serde(default)]
    pub layer: i32,
}

impl Path {
    /// Create a path from points with the tool's fixed width and opacity.
    pub fn from_points(points: Vec<Point>, tool: StrokeTool, color: HexColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            line_width: tool.width(),
            alpha: tool.alpha(),
            tool,
            layer: 0,
        }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Effective opacity.
    pub fn opacity(&self) -> f64 {
        self.alpha.unwrap_or(1.0)
    }

    /// Consecutive point pairs making up the stroke.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

impl ElementTrait for Path {
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
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        point_to_polyline_dist(point, &self.points) <= tolerance + self.line_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for point in iter {
                path.line_to(*point);
            }
        }
        path
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_defaults() {
        let pen = Path::from_points(Vec::new(), StrokeTool::Pen, HexColor::black());
        assert_eq!(pen.line_width, 2.0);
        assert_eq!(pen.opacity(), 1.0);

        let marker = Path::from_points(Vec::new(), StrokeTool::Highlighter, HexColor::black());
        assert_eq!(marker.line_width, 8.0);
        assert_eq!(marker.alpha, Some(0.4));
    }

    #[test]
    fn test_bounds() {
        let path = Path::from_points(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
            ],
            StrokeTool::Pen,
            HexColor::black(),
        );
        assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_hit_test() {
        let path = Path::from_points(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            StrokeTool::Pen,
            HexColor::black(),
        );
        assert!(path.hit_test(Point::new(50.0, 0.0), 5.0));
        assert!(!path.hit_test(Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_segments() {
        let path = Path::from_points(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)],
            StrokeTool::Pen,
            HexColor::black(),
        );
        assert_eq!(path.segments().count(), 2);
    }
}

//! Tool system for the whiteboard.

use crate::elements::{Arrow, Circle, Element, HexColor, Line, Path, Rectangle, StrokeTool};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Hand,
    Pen,
    Highlighter,
    Rectangle,
    Circle,
    Line,
    Arrow,
    Text,
    Sticky,
}

impl ToolKind {
    /// Freehand stroke flavor, for the path tools.
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            ToolKind::Pen => Some(StrokeTool::Pen),
            ToolKind::Highlighter => Some(StrokeTool::Highlighter),
            ToolKind::Select
            | ToolKind::Hand
            | ToolKind::Rectangle
            | ToolKind::Circle
            | ToolKind::Line
            | ToolKind::Arrow
            | ToolKind::Text
            | ToolKind::Sticky => None,
        }
    }

    /// Tools that drag out a shape from an anchor point.
    pub fn is_shape_tool(self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line | ToolKind::Arrow
        )
    }

    /// Lowercase tool name, as persisted in board settings.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Hand => "hand",
            ToolKind::Pen => "pen",
            ToolKind::Highlighter => "highlighter",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Line => "line",
            ToolKind::Arrow => "arrow",
            ToolKind::Text => "text",
            ToolKind::Sticky => "sticky",
        }
    }

    /// Tool bound to a bare (unmodified) key press.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "v" => Some(ToolKind::Select),
            "p" => Some(ToolKind::Pen),
            "h" => Some(ToolKind::Highlighter),
            "t" => Some(ToolKind::Text),
            "s" => Some(ToolKind::Sticky),
            "r" => Some(ToolKind::Rectangle),
            "o" => Some(ToolKind::Circle),
            "l" => Some(ToolKind::Line),
            "a" => Some(ToolKind::Arrow),
            " " | "space" => Some(ToolKind::Hand),
            _ => None,
        }
    }

    /// All tools, in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Select,
            ToolKind::Hand,
            ToolKind::Pen,
            ToolKind::Highlighter,
            ToolKind::Rectangle,
            ToolKind::Circle,
            ToolKind::Line,
            ToolKind::Arrow,
            ToolKind::Text,
            ToolKind::Sticky,
        ]
    }
}

/// Build the final shape for a drag from `anchor` to `end`.
pub fn shape_from_drag(tool: ToolKind, anchor: Point, end: Point, color: HexColor) -> Option<Element> {
    match tool {
        ToolKind::Rectangle => Some(Element::Rectangle(Rectangle::from_corners(anchor, end, color))),
        ToolKind::Circle => Some(Element::Circle(Circle::from_drag(anchor, end, color))),
        ToolKind::Line => Some(Element::Line(Line::new(anchor, end, color))),
        ToolKind::Arrow => Some(Element::Arrow(Arrow::new(anchor, end, color))),
        ToolKind::Select
        | ToolKind::Hand
        | ToolKind::Pen
        | ToolKind::Highlighter
        | ToolKind::Text
        | ToolKind::Sticky => None,
    }
}

/// State of a drawing gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Freehand stroke accumulating points.
    Stroke {
        tool: StrokeTool,
        color: HexColor,
        points: Vec<Point>,
    },
    /// Shape being dragged out from its anchor.
    Shape {
        tool: ToolKind,
        color: HexColor,
        anchor: Point,
        current: Point,
    },
}

/// What an `update` call changed.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureUpdate {
    /// Nothing in progress.
    None,
    /// A freehand stroke grew by one segment.
    Segment {
        from: Point,
        to: Point,
        tool: StrokeTool,
        color: HexColor,
    },
    /// The shape preview changed.
    Preview(Element),
}

/// Manages the current tool, color and gesture state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Color applied to new elements.
    pub current_color: HexColor,
    /// Current state of the tool.
    pub state: ToolState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Begin a gesture. Returns false for tools that do not draw.
    pub fn begin(&mut self, point: Point) -> bool {
        let color = self.current_color;
        self.state = if let Some(tool) = self.current_tool.stroke_tool() {
            ToolState::Stroke {
                tool,
                color,
                points: vec![point],
            }
        } else if self.current_tool.is_shape_tool() {
            ToolState::Shape {
                tool: self.current_tool,
                color,
                anchor: point,
                current: point,
            }
        } else {
            ToolState::Idle
        };
        self.is_active()
    }

    /// Extend the gesture to `point`.
    pub fn update(&mut self, point: Point) -> GestureUpdate {
        match &mut self.state {
            ToolState::Idle => GestureUpdate::None,
            ToolState::Stroke { tool, color, points } => {
                let from = points.last().copied().unwrap_or(point);
                points.push(point);
                GestureUpdate::Segment {
                    from,
                    to: point,
                    tool: *tool,
                    color: *color,
                }
            }
            ToolState::Shape {
                tool,
                color,
                anchor,
                current,
            } => {
                *current = point;
                match shape_from_drag(*tool, *anchor, point, *color) {
                    Some(preview) => GestureUpdate::Preview(preview),
                    None => GestureUpdate::None,
                }
            }
        }
    }

    /// Finish the gesture at `end`, producing the element to store.
    ///
    /// Freehand strokes keep only the points gathered while moving; a stroke
    /// with fewer than two points yields nothing.
    pub fn end(&mut self, end: Point) -> Option<Element> {
        match std::mem::take(&mut self.state) {
            ToolState::Idle => None,
            ToolState::Stroke { tool, color, points } => {
                if points.len() < 2 {
                    log::debug!("Discarding single-point stroke");
                    return None;
                }
                Some(Element::Path(Path::from_points(points, tool, color)))
            }
            ToolState::Shape {
                tool, color, anchor, ..
            } => shape_from_drag(tool, anchor, end, color),
        }
    }

    /// Abandon the gesture.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Preview of the in-progress shape, if any.
    pub fn preview(&self) -> Option<Element> {
        match &self.state {
            ToolState::Shape {
                tool,
                color,
                anchor,
                current,
            } => shape_from_drag(*tool, *anchor, *current, *color),
            ToolState::Idle | ToolState::Stroke { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kinds() {
        assert!(ToolKind::Pen.stroke_tool().is_some());
        assert!(ToolKind::Highlighter.stroke_tool().is_some());
        assert!(ToolKind::Arrow.is_shape_tool());
        assert!(!ToolKind::Text.is_shape_tool());
        assert_eq!(ToolKind::from_key("o"), Some(ToolKind::Circle));
        assert_eq!(ToolKind::from_key("q"), None);
        assert_eq!(serde_json::to_string(&ToolKind::Highlighter).unwrap(), "\"highlighter\"");
    }

    #[test]
    fn test_non_drawing_tools_start_nothing() {
        let mut tools = ToolManager::new();
        for tool in [ToolKind::Select, ToolKind::Hand, ToolKind::Text, ToolKind::Sticky] {
            tools.set_tool(tool);
            assert!(!tools.begin(Point::ZERO));
            assert_eq!(tools.update(Point::new(5.0, 5.0)), GestureUpdate::None);
            assert!(tools.end(Point::new(5.0, 5.0)).is_none());
        }
    }

    #[test]
    fn test_stroke_gesture() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Pen);
        assert!(tools.begin(Point::new(0.0, 0.0)));
        match tools.update(Point::new(5.0, 0.0)) {
            GestureUpdate::Segment { from, to, .. } => {
                assert_eq!(from, Point::new(0.0, 0.0));
                assert_eq!(to, Point::new(5.0, 0.0));
            }
            other => panic!("unexpected update {other:?}"),
        }
        let element = tools.end(Point::new(9.0, 9.0)).unwrap();
        match element {
            Element::Path(path) => assert_eq!(path.points.len(), 2),
            other => panic!("unexpected element {:?}", other.kind()),
        }
        assert!(!tools.is_active());
    }

    #[test]
    fn test_single_point_stroke_discarded() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Highlighter);
        tools.begin(Point::new(3.0, 3.0));
        assert!(tools.end(Point::new(3.0, 3.0)).is_none());
    }

    #[test]
    fn test_shape_gesture_uses_end_point() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Rectangle);
        tools.begin(Point::new(10.0, 10.0));
        assert!(matches!(
            tools.update(Point::new(30.0, 30.0)),
            GestureUpdate::Preview(Element::Rectangle(_))
        ));
        assert!(tools.preview().is_some());
        match tools.end(Point::new(50.0, 40.0)).unwrap() {
            Element::Rectangle(rect) => {
                assert_eq!(rect.start(), Point::new(10.0, 10.0));
                assert_eq!(rect.end(), Point::new(50.0, 40.0));
            }
            other => panic!("unexpected element {:?}", other.kind()),
        }
    }

    #[test]
    fn test_set_tool_cancels() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Line);
        tools.begin(Point::ZERO);
        tools.set_tool(ToolKind::Pen);
        assert!(!tools.is_active());
    }
}

//! Drawing engine: turns pointer gestures into painted pixels and stored
//! elements.

use crate::painter::{paint_element, paint_segment};
use crate::surface::Surface;
use collabodraw_core::{Element, ElementId, ElementStore, GestureUpdate, HexColor, ToolKind, ToolManager};
use kurbo::Point;

/// Paints gestures live and keeps the surface in sync with the store.
///
/// Freehand segments are painted as they arrive. Shape gestures repaint the
/// board and draw a preview on top. Committing an element repaints only
/// when the live pixels could differ from a full redraw.
#[derive(Debug)]
pub struct DrawingEngine<S: Surface> {
    surface: S,
    tools: ToolManager,
    background: HexColor,
}

impl<S: Surface> DrawingEngine<S> {
    pub fn new(surface: S, background: HexColor) -> Self {
        let mut engine = Self {
            surface,
            tools: ToolManager::new(),
            background,
        };
        engine.surface.clear(background);
        engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn background(&self) -> HexColor {
        self.background
    }

    /// Whether a gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        self.tools.is_active()
    }

    /// The in-progress shape preview, if any.
    pub fn preview(&self) -> Option<Element> {
        self.tools.preview()
    }

    /// Start a gesture with `tool` at `point`.
    ///
    /// Returns false when the tool does not draw (select, hand, text,
    /// sticky); nothing is painted in that case.
    pub fn begin_stroke(&mut self, tool: ToolKind, color: HexColor, point: Point) -> bool {
        self.tools.set_tool(tool);
        self.tools.current_color = color;
        let started = self.tools.begin(point);
        if started {
            log::trace!("Gesture started: {} at ({:.1}, {:.1})", tool.name(), point.x, point.y);
        }
        started
    }

    /// Extend the gesture to `point`.
    pub fn extend_stroke(&mut self, point: Point, store: &ElementStore) {
        match self.tools.update(point) {
            GestureUpdate::None => {}
            GestureUpdate::Segment { from, to, tool, color } => {
                paint_segment(&mut self.surface, from, to, tool.width(), color, tool.alpha());
            }
            GestureUpdate::Preview(preview) => {
                self.redraw_all(store);
                paint_element(&mut self.surface, &preview);
            }
        }
    }

    /// Finish the gesture at `end` and append the result to `store`.
    ///
    /// Returns the id of the stored element, or `None` when the gesture
    /// produced nothing worth keeping.
    pub fn commit_stroke(&mut self, end: Point, store: &mut ElementStore) -> Option<ElementId> {
        let element = self.tools.end(end);
        let Some(element) = element else {
            // A discarded shape may have left its preview on screen
            self.redraw_all(store);
            return None;
        };
        let is_path = matches!(element, Element::Path(_));
        let id = store.append(element);
        let Some(id) = id else {
            self.redraw_all(store);
            return None;
        };

        // Live freehand pixels already match a redraw unless something is
        // layered above the new stroke.
        let on_top = store.drawing_order().last().map(|e| e.id()) == Some(id);
        if !(is_path && on_top) {
            self.redraw_all(store);
        }
        log::debug!("Committed element {}", id);
        Some(id)
    }

    /// Abandon the gesture and restore the surface.
    pub fn cancel_stroke(&mut self, store: &ElementStore) {
        if self.tools.is_active() {
            self.tools.cancel();
            self.redraw_all(store);
        }
    }

    /// Clear the surface and paint every element in drawing order.
    pub fn redraw_all(&mut self, store: &ElementStore) {
        self.surface.clear(self.background);
        for element in store.drawing_order() {
            paint_element(&mut self.surface, element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterSurface;
    use collabodraw_core::elements::Rectangle;

    fn engine() -> DrawingEngine<RasterSurface> {
        DrawingEngine::new(RasterSurface::new(300, 200).unwrap(), HexColor::white())
    }

    fn draw(engine: &mut DrawingEngine<RasterSurface>, store: &mut ElementStore, tool: ToolKind, points: &[Point]) -> Option<ElementId> {
        engine.begin_stroke(tool, HexColor::rgb(0x25, 0x63, 0xeb), points[0]);
        for p in &points[1..] {
            engine.extend_stroke(*p, store);
        }
        engine.commit_stroke(*points.last().unwrap(), store)
    }

    fn zigzag() -> Vec<Point> {
        vec![
            Point::new(20.0, 20.0),
            Point::new(80.0, 60.0),
            Point::new(140.0, 30.0),
            Point::new(200.0, 120.0),
            Point::new(210.0, 125.0),
        ]
    }

    #[test]
    fn test_live_stroke_matches_full_redraw() {
        for tool in [ToolKind::Pen, ToolKind::Highlighter] {
            let mut engine = engine();
            let mut store = ElementStore::new();
            draw(&mut engine, &mut store, tool, &zigzag()).unwrap();
            let live = engine.surface().clone();

            engine.redraw_all(&store);
            assert_eq!(live.pixels(), engine.surface().pixels(), "{:?}", tool);
        }
    }

    #[test]
    fn test_live_stroke_over_existing_matches_redraw() {
        let mut engine = engine();
        let mut store = ElementStore::new();
        draw(&mut engine, &mut store, ToolKind::Rectangle, &[Point::new(10.0, 10.0), Point::new(150.0, 100.0)]).unwrap();
        draw(&mut engine, &mut store, ToolKind::Highlighter, &zigzag()).unwrap();
        let live = engine.surface().clone();

        engine.redraw_all(&store);
        assert_eq!(live.pixels(), engine.surface().pixels());
    }

    #[test]
    fn test_stroke_under_front_layer_redraws() {
        let mut engine = engine();
        let mut store = ElementStore::new();
        let mut rect = Rectangle::from_corners(Point::new(0.0, 0.0), Point::new(250.0, 150.0), HexColor::black());
        rect.layer = 1000;
        store.append(Element::Rectangle(rect));
        engine.redraw_all(&store);

        draw(&mut engine, &mut store, ToolKind::Pen, &[Point::new(0.0, 150.0), Point::new(250.0, 150.0)]).unwrap();
        let live = engine.surface().clone();
        engine.redraw_all(&store);
        assert_eq!(live.pixels(), engine.surface().pixels());
    }

    #[test]
    fn test_shape_preview_then_commit() {
        let mut engine = engine();
        let mut store = ElementStore::new();
        assert!(engine.begin_stroke(ToolKind::Line, HexColor::black(), Point::new(10.0, 100.0)));
        engine.extend_stroke(Point::new(290.0, 100.0), &store);
        assert_eq!(engine.surface().pixel(150, 100), Some(HexColor::black()));
        // Shrinking the drag erases the stale preview
        engine.extend_stroke(Point::new(50.0, 100.0), &store);
        assert_eq!(engine.surface().pixel(150, 100), Some(HexColor::white()));
        assert!(store.is_empty());

        let id = engine.commit_stroke(Point::new(50.0, 100.0), &mut store).unwrap();
        assert!(store.contains(id));
        assert!(!engine.is_drawing());
    }

    #[test]
    fn test_single_point_stroke_discarded() {
        let mut engine = engine();
        let mut store = ElementStore::new();
        engine.begin_stroke(ToolKind::Pen, HexColor::black(), Point::new(5.0, 5.0));
        assert!(engine.commit_stroke(Point::new(5.0, 5.0), &mut store).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_non_drawing_tools() {
        let mut engine = engine();
        for tool in [ToolKind::Select, ToolKind::Hand, ToolKind::Text, ToolKind::Sticky] {
            assert!(!engine.begin_stroke(tool, HexColor::black(), Point::ZERO));
            assert!(!engine.is_drawing());
        }
    }

    #[test]
    fn test_cancel_restores_surface() {
        let mut engine = engine();
        let store = ElementStore::new();
        let blank = engine.surface().clone();
        engine.begin_stroke(ToolKind::Pen, HexColor::black(), Point::new(10.0, 10.0));
        engine.extend_stroke(Point::new(100.0, 100.0), &store);
        assert_ne!(&blank, engine.surface());
        engine.cancel_stroke(&store);
        assert_eq!(&blank, engine.surface());
    }
}

//! View transform for zooming and panning the board.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.1;
/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 3.0;
/// Multiplier applied by one zoom-in step.
pub const ZOOM_STEP: f64 = 1.2;

/// Zoom and pan applied uniformly to the whole board surface.
///
/// The board is first translated by `pan` (in board units) and then scaled
/// by `zoom`, so `screen = zoom * (board + pan)`. Element coordinates are
/// never touched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub pan: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl Viewport {
    /// Create a viewport, clamping `zoom` into range.
    pub fn new(zoom: f64, pan: Vec2) -> Self {
        let zoom = if zoom.is_finite() {
            zoom.clamp(ZOOM_MIN, ZOOM_MAX)
        } else {
            1.0
        };
        Self { zoom, pan }
    }

    /// Board-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(self.pan)
    }

    /// Screen-to-board transform.
    pub fn inverse(&self) -> Affine {
        Affine::translate(-self.pan) * Affine::scale(1.0 / self.zoom)
    }

    pub fn screen_to_board(&self, screen_point: Point) -> Point {
        self.inverse() * screen_point
    }

    pub fn board_to_screen(&self, board_point: Point) -> Point {
        self.transform() * board_point
    }

    /// Multiply the zoom by [`ZOOM_STEP`].
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Divide the zoom by [`ZOOM_STEP`].
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Set the zoom, clamped into range. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        }
    }

    /// Pan by a delta in screen pixels. Non-finite deltas are ignored.
    pub fn pan(&mut self, screen_delta: Vec2) {
        if screen_delta.is_finite() {
            self.pan += screen_delta / self.zoom;
        }
    }

    /// Zoom by `factor`, keeping the board point under `screen_point` fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        if !factor.is_finite() || !screen_point.is_finite() {
            return;
        }
        let anchor = self.screen_to_board(screen_point);
        self.set_zoom(self.zoom * factor);
        self.pan = screen_point.to_vec2() / self.zoom - anchor.to_vec2();
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::default();
        assert_eq!(viewport.zoom_percent(), 100);
        assert_close(viewport.screen_to_board(Point::new(10.0, 20.0)), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_zoom_clamped() {
        let mut viewport = Viewport::default();
        for _ in 0..50 {
            viewport.zoom_in();
            assert!(viewport.zoom <= ZOOM_MAX);
        }
        assert_eq!(viewport.zoom, ZOOM_MAX);
        for _ in 0..100 {
            viewport.zoom_out();
            assert!(viewport.zoom >= ZOOM_MIN);
        }
        assert_eq!(viewport.zoom, ZOOM_MIN);
    }

    #[test]
    fn test_zoom_step() {
        let mut viewport = Viewport::default();
        viewport.zoom_in();
        assert_eq!(viewport.zoom_percent(), 120);
        viewport.zoom_out();
        assert_eq!(viewport.zoom_percent(), 100);
    }

    #[test]
    fn test_roundtrip_with_pan_and_zoom() {
        let mut viewport = Viewport::default();
        viewport.zoom_in();
        viewport.pan(Vec2::new(30.0, -12.0));
        let board = Point::new(123.0, 45.0);
        assert_close(viewport.screen_to_board(viewport.board_to_screen(board)), board);
    }

    #[test]
    fn test_pan_is_in_screen_pixels() {
        let mut viewport = Viewport::new(2.0, Vec2::ZERO);
        let before = viewport.board_to_screen(Point::ZERO);
        viewport.pan(Vec2::new(10.0, 0.0));
        let after = viewport.board_to_screen(Point::ZERO);
        assert!((after.x - before.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_at_keeps_anchor() {
        let mut viewport = Viewport::default();
        let screen = Point::new(200.0, 150.0);
        let board = viewport.screen_to_board(screen);
        viewport.zoom_at(screen, 1.5);
        assert_close(viewport.screen_to_board(screen), board);
    }

    #[test]
    fn test_reset() {
        let mut viewport = Viewport::new(2.5, Vec2::new(5.0, 5.0));
        viewport.reset();
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Viewport::new(10.0, Vec2::ZERO).zoom, ZOOM_MAX);
        assert_eq!(Viewport::new(f64::NAN, Vec2::ZERO).zoom, 1.0);
    }

    #[test]
    fn test_non_finite_input_ignored() {
        let mut viewport = Viewport::new(1.2, Vec2::new(4.0, -3.0));
        let before = viewport;
        viewport.set_zoom(f64::NAN);
        viewport.zoom_at(Point::new(100.0, 100.0), f64::NAN);
        viewport.zoom_at(Point::new(f64::INFINITY, 0.0), 1.5);
        viewport.pan(Vec2::new(f64::NAN, 1.0));
        assert_eq!(viewport, before);
    }
}

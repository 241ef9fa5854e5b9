//! Screen view of the board surface.
//!
//! The board is painted in board units; the view samples it through the
//! viewport so zoom and pan never rewrite element coordinates.

use crate::raster::RasterSurface;
use crate::surface::{RenderResult, Surface};
use collabodraw_core::HexColor;
use collabodraw_core::presence::RemoteCursor;
use collabodraw_core::viewport::Viewport;
use kurbo::{Point, Rect};

/// Outline color for selected elements.
pub const SELECTION_COLOR: HexColor = HexColor::rgb(0x3b, 0x82, 0xf6);
/// Screen-space padding around a selection outline.
const SELECTION_PADDING: f64 = 4.0;
/// Radius of a remote cursor marker.
const CURSOR_RADIUS: f64 = 6.0;

/// Sample `board` through `viewport` into a `width` x `height` surface.
///
/// Screen pixels that map outside the board show `background`.
pub fn compose_view(
    board: &RasterSurface,
    viewport: &Viewport,
    width: u32,
    height: u32,
    background: HexColor,
) -> RenderResult<RasterSurface> {
    let mut screen = RasterSurface::new(width, height)?;
    screen.clear(background);
    let inverse = viewport.inverse();
    for y in 0..height {
        for x in 0..width {
            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let source = inverse * center;
            if source.x < 0.0 || source.y < 0.0 {
                continue;
            }
            // Nearest sample
            let (bx, by) = (source.x.floor() as u32, source.y.floor() as u32);
            if let Some(color) = board.pixel(bx, by) {
                screen.put_pixel(x, y, color);
            }
        }
    }
    Ok(screen)
}

/// Outline the board-space `bounds` of each selected element on the screen.
pub fn overlay_selection<S: Surface + ?Sized>(screen: &mut S, viewport: &Viewport, bounds: &[Rect]) {
    for rect in bounds {
        let p0 = viewport.board_to_screen(Point::new(rect.x0, rect.y0));
        let p1 = viewport.board_to_screen(Point::new(rect.x1, rect.y1));
        let outline = Rect::from_points(p0, p1).inflate(SELECTION_PADDING, SELECTION_PADDING);
        let corners = [
            Point::new(outline.x0, outline.y0),
            Point::new(outline.x1, outline.y0),
            Point::new(outline.x1, outline.y1),
            Point::new(outline.x0, outline.y1),
        ];
        for i in 0..4 {
            screen.stroke_segment(corners[i], corners[(i + 1) % 4], 2.0, SELECTION_COLOR);
        }
    }
}

/// Draw a marker for every simulated remote cursor.
pub fn overlay_cursors<S: Surface + ?Sized>(screen: &mut S, viewport: &Viewport, cursors: &[RemoteCursor]) {
    for cursor in cursors {
        let at = viewport.board_to_screen(cursor.position);
        screen.stroke_circle(at, CURSOR_RADIUS, 2.0, cursor.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn board_with_mark() -> RasterSurface {
        let mut board = RasterSurface::new(100, 100).unwrap();
        board.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0), HexColor::black());
        board
    }

    #[test]
    fn test_identity_view_copies_board() {
        let board = board_with_mark();
        let screen = compose_view(&board, &Viewport::default(), 100, 100, HexColor::white()).unwrap();
        assert_eq!(screen.pixels(), board.pixels());
    }

    #[test]
    fn test_zoomed_view_scales() {
        let board = board_with_mark();
        let viewport = Viewport::new(2.0, Vec2::ZERO);
        let screen = compose_view(&board, &viewport, 100, 100, HexColor::white()).unwrap();
        // Board (15, 15) lands at screen (30, 30)
        assert_eq!(screen.pixel(30, 30), Some(HexColor::black()));
        assert_eq!(screen.pixel(15, 15), Some(HexColor::white()));
    }

    #[test]
    fn test_outside_board_is_background() {
        let board = board_with_mark();
        let grey = HexColor::rgb(200, 200, 200);
        let viewport = Viewport::new(1.0, Vec2::new(50.0, 0.0));
        let screen = compose_view(&board, &viewport, 100, 100, grey).unwrap();
        assert_eq!(screen.pixel(10, 50), Some(grey));
        assert_eq!(screen.pixel(65, 15), Some(HexColor::black()));
    }

    #[test]
    fn test_selection_overlay() {
        let mut screen = RasterSurface::new(100, 100).unwrap();
        overlay_selection(&mut screen, &Viewport::default(), &[Rect::new(20.0, 20.0, 60.0, 60.0)]);
        assert_eq!(screen.pixel(40, 16), Some(SELECTION_COLOR));
        assert_eq!(screen.pixel(40, 40), Some(HexColor::white()));
    }
}

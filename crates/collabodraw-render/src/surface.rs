//! Drawing surface abstraction.

use collabodraw_core::HexColor;
use kurbo::{Point, Rect};
use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Primitive operations the element painter needs.
///
/// Coordinates are in surface pixels; colors carry their own alpha and are
/// composited source-over.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with an opaque color.
    fn clear(&mut self, color: HexColor);

    /// Stroke a straight segment with round caps.
    fn stroke_segment(&mut self, from: Point, to: Point, width: f64, color: HexColor);

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: HexColor);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: HexColor);

    /// Bounds of the surface as a rect.
    fn bounds(&self) -> Rect {
        let (w, h) = self.size();
        Rect::new(0.0, 0.0, f64::from(w), f64::from(h))
    }
}

//! PNG export of the board.

use crate::engine::DrawingEngine;
use crate::raster::RasterSurface;
use crate::surface::RenderResult;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use collabodraw_core::{ElementStore, HexColor};

/// Download name used when the board has no name.
pub const FALLBACK_EXPORT_NAME: &str = "collabodraw-board.png";

/// Encode a surface as a `data:image/png;base64,...` URL.
pub fn png_data_url(surface: &RasterSurface) -> RenderResult<String> {
    let png = surface.encode_png()?;
    Ok(format!("data:image/png;base64,{}", BASE64_STANDARD.encode(png)))
}

/// Download file name for a board.
pub fn export_file_name(board_name: &str) -> String {
    let name = board_name.trim();
    if name.is_empty() {
        FALLBACK_EXPORT_NAME.to_string()
    } else {
        format!("{}.png", name)
    }
}

/// Paint every element of `store` onto a fresh surface.
pub fn render_board(store: &ElementStore, width: u32, height: u32, background: HexColor) -> RenderResult<RasterSurface> {
    let mut engine = DrawingEngine::new(RasterSurface::new(width, height)?, background);
    engine.redraw_all(store);
    Ok(engine.into_surface())
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabodraw_core::Element;
    use collabodraw_core::elements::Line;
    use kurbo::Point;

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Sprint Plan"), "Sprint Plan.png");
        assert_eq!(export_file_name("   "), FALLBACK_EXPORT_NAME);
    }

    #[test]
    fn test_data_url_prefix() {
        let surface = RasterSurface::new(4, 4).unwrap();
        let url = png_data_url(&surface).unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_render_board() {
        let mut store = ElementStore::new();
        store.append(Element::Line(Line::new(
            Point::new(0.0, 10.0),
            Point::new(40.0, 10.0),
            HexColor::black(),
        )));
        let surface = render_board(&store, 40, 20, HexColor::white()).unwrap();
        assert_eq!(surface.pixel(20, 10), Some(HexColor::black()));
        assert!(render_board(&store, 0, 20, HexColor::white()).is_err());
    }
}

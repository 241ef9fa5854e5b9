//! CollaboDraw Render Library
//!
//! Surface abstraction, a software raster surface, the element painter and
//! the drawing engine that keeps pixels in sync with the element store.

pub mod engine;
pub mod export;
pub mod painter;
pub mod raster;
mod surface;
pub mod view;

pub use engine::DrawingEngine;
pub use export::{export_file_name, png_data_url, render_board};
pub use painter::paint_element;
pub use raster::RasterSurface;
pub use surface::{RenderError, RenderResult, Surface};
pub use view::compose_view;

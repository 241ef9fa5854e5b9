//! Software RGBA raster surface.

use crate::surface::{RenderError, RenderResult, Surface};
use collabodraw_core::HexColor;
use collabodraw_core::elements::point_to_segment_dist;
use kurbo::{Point, Rect};

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 16_384;

/// An RGBA8 pixel buffer with source-over compositing.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Create a white surface.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![255u8; (width as usize) * (height as usize) * 4],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at a pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<HexColor> {
        let idx = self.index(x, y)?;
        let p = &self.pixels[idx..idx + 4];
        Some(HexColor::new(p[0], p[1], p[2], p[3]))
    }

    /// Overwrite a pixel without blending.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: HexColor) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(((y as usize) * (self.width as usize) + x as usize) * 4)
        } else {
            None
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: HexColor) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let alpha = f32::from(color.a) / 255.0;
        let inv_alpha = 1.0 - alpha;
        let px = &mut self.pixels[idx..idx + 4];
        px[0] = (f32::from(color.r) * alpha + f32::from(px[0]) * inv_alpha) as u8;
        px[1] = (f32::from(color.g) * alpha + f32::from(px[1]) * inv_alpha) as u8;
        px[2] = (f32::from(color.b) * alpha + f32::from(px[2]) * inv_alpha) as u8;
        px[3] = 255;
    }

    /// Pixel index ranges covering `rect`, clipped to the surface.
    fn covered(&self, rect: Rect) -> Option<(std::ops::Range<u32>, std::ops::Range<u32>)> {
        let x0 = rect.x0.floor().max(0.0);
        let y0 = rect.y0.floor().max(0.0);
        let x1 = rect.x1.ceil().min(f64::from(self.width));
        let y1 = rect.y1.ceil().min(f64::from(self.height));
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32..x1 as u32, y0 as u32..y1 as u32))
    }

    /// Blend `color` into every pixel whose center satisfies `inside`.
    fn shade<F>(&mut self, area: Rect, color: HexColor, inside: F)
    where
        F: Fn(Point) -> bool,
    {
        let Some((xs, ys)) = self.covered(area) else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if inside(center) {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder
                .write_header()
                .map_err(|e| RenderError::Encode(e.to_string()))?;
            writer
                .write_image_data(&self.pixels)
                .map_err(|e| RenderError::Encode(e.to_string()))?;
        }
        Ok(png_data)
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: HexColor) {
        for chunk in self.pixels.chunks_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, width: f64, color: HexColor) {
        let half = width / 2.0;
        let area = Rect::from_points(from, to).inflate(half, half);
        self.shade(area, color, |p| point_to_segment_dist(p, from, to) <= half);
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: HexColor) {
        let half = width / 2.0;
        let reach = radius + half;
        let area = Rect::new(center.x - reach, center.y - reach, center.x + reach, center.y + reach);
        self.shade(area, color, |p| (p.distance(center) - radius).abs() <= half);
    }

    fn fill_rect(&mut self, rect: Rect, color: HexColor) {
        let rect = rect.abs();
        self.shade(rect, color, |p| rect.contains(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_size() {
        assert!(matches!(
            RasterSurface::new(0, 10),
            Err(RenderError::InvalidSize { .. })
        ));
        assert!(RasterSurface::new(MAX_DIMENSION + 1, 1).is_err());
    }

    #[test]
    fn test_clear_and_pixel() {
        let mut surface = RasterSurface::new(4, 4).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(HexColor::white()));
        surface.clear(HexColor::rgb(10, 20, 30));
        assert_eq!(surface.pixel(3, 3), Some(HexColor::rgb(10, 20, 30)));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn test_stroke_segment_covers_line() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        surface.stroke_segment(Point::new(2.0, 10.0), Point::new(18.0, 10.0), 2.0, HexColor::black());
        assert_eq!(surface.pixel(10, 9), Some(HexColor::black()));
        assert_eq!(surface.pixel(10, 10), Some(HexColor::black()));
        assert_eq!(surface.pixel(10, 5), Some(HexColor::white()));
    }

    #[test]
    fn test_alpha_blending() {
        let mut surface = RasterSurface::new(4, 4).unwrap();
        surface.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), HexColor::new(0, 0, 0, 102));
        let px = surface.pixel(1, 1).unwrap();
        assert!(px.r > 100 && px.r < 200);
        assert_eq!(px.a, 255);
    }

    #[test]
    fn test_stroke_circle_ring() {
        let mut surface = RasterSurface::new(40, 40).unwrap();
        surface.stroke_circle(Point::new(20.0, 20.0), 10.0, 2.0, HexColor::black());
        assert_eq!(surface.pixel(29, 19), Some(HexColor::black()));
        assert_eq!(surface.pixel(20, 20), Some(HexColor::white()));
    }

    #[test]
    fn test_clipping_off_surface() {
        let mut surface = RasterSurface::new(10, 10).unwrap();
        surface.stroke_segment(Point::new(-50.0, -50.0), Point::new(-20.0, -20.0), 4.0, HexColor::black());
        surface.fill_rect(Rect::new(100.0, 100.0, 200.0, 200.0), HexColor::black());
        assert!(surface.pixels().iter().all(|b| *b == 255));
    }

    #[test]
    fn test_encode_png_signature() {
        let surface = RasterSurface::new(8, 8).unwrap();
        let png = surface.encode_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}

//! Painting elements onto a surface.

use crate::surface::Surface;
use collabodraw_core::HexColor;
use collabodraw_core::elements::{
    Arrow, Circle, Element, Line, Path, Rectangle, SHAPE_STROKE_WIDTH, StickyNote, Text,
};
use kurbo::{Point, Rect};
use peniko::Color;

/// Stroke width of the sticky note border.
const STICKY_BORDER_WIDTH: f64 = 2.0;

/// Effective stroke color for a freehand stroke.
pub fn stroke_color(color: HexColor, alpha: Option<f64>) -> HexColor {
    match alpha {
        Some(alpha) => Color::from(color).multiply_alpha(alpha.clamp(0.0, 1.0) as f32).into(),
        None => color,
    }
}

/// Paint one freehand segment.
///
/// Both live strokes and full redraws go through here so they produce
/// identical pixels.
pub fn paint_segment<S: Surface + ?Sized>(
    surface: &mut S,
    from: Point,
    to: Point,
    width: f64,
    color: HexColor,
    alpha: Option<f64>,
) {
    surface.stroke_segment(from, to, width, stroke_color(color, alpha));
}

/// Paint any element.
pub fn paint_element<S: Surface + ?Sized>(surface: &mut S, element: &Element) {
    match element {
        Element::Path(path) => paint_path(surface, path),
        Element::Rectangle(rect) => paint_rectangle(surface, rect),
        Element::Circle(circle) => paint_circle(surface, circle),
        Element::Line(line) => paint_line(surface, line),
        Element::Arrow(arrow) => paint_arrow(surface, arrow),
        Element::Text(text) => paint_text(surface, text),
        Element::Sticky(note) => paint_sticky(surface, note),
    }
}

fn paint_path<S: Surface + ?Sized>(surface: &mut S, path: &Path) {
    for (from, to) in path.segments() {
        paint_segment(surface, from, to, path.line_width, path.color, path.alpha);
    }
}

fn outline<S: Surface + ?Sized>(surface: &mut S, rect: Rect, width: f64, color: HexColor) {
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    for i in 0..corners.len() {
        surface.stroke_segment(corners[i], corners[(i + 1) % corners.len()], width, color);
    }
}

fn paint_rectangle<S: Surface + ?Sized>(surface: &mut S, rect: &Rectangle) {
    outline(surface, rect.as_rect(), SHAPE_STROKE_WIDTH, rect.color);
}

fn paint_circle<S: Surface + ?Sized>(surface: &mut S, circle: &Circle) {
    surface.stroke_circle(circle.center(), circle.radius, SHAPE_STROKE_WIDTH, circle.color);
}

fn paint_line<S: Surface + ?Sized>(surface: &mut S, line: &Line) {
    surface.stroke_segment(line.start(), line.end(), SHAPE_STROKE_WIDTH, line.color);
}

fn paint_arrow<S: Surface + ?Sized>(surface: &mut S, arrow: &Arrow) {
    // Shaft first, then the barbs
    for (from, to) in arrow.segments() {
        surface.stroke_segment(from, to, SHAPE_STROKE_WIDTH, arrow.color);
    }
}

fn paint_text<S: Surface + ?Sized>(surface: &mut S, text: &Text) {
    for cell in text.glyph_cells() {
        surface.fill_rect(cell, text.color);
    }
}

fn paint_sticky<S: Surface + ?Sized>(surface: &mut S, note: &StickyNote) {
    let rect = note.rect();
    surface.fill_rect(rect, note.color);
    outline(surface, rect, STICKY_BORDER_WIDTH, note.border_color());
    let ink = note.color.darken(0.75);
    for cell in note.glyph_cells() {
        surface.fill_rect(cell, ink);
    }
}

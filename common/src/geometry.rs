//! Screen/template coordinate conversion for the field canvas and the preview.
//!
//! Template space is the template image's native pixel grid. The canvas draws
//! it shrunk by a single `scale` factor; pointer positions arrive in client
//! (viewport) pixels and are mapped back through the canvas origin and scale.

use crate::model::template::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, FieldMapping};

/// Padding the canvas container keeps around the rendered template.
pub const CANVAS_PADDING: f64 = 40.0;
/// Fixed box the preview card fits the template into.
pub const PREVIEW_BOX: Size = Size::new(300.0, 200.0);

/// Label font factor and floor for field boxes on the canvas.
pub const CANVAS_LABEL: LabelFont = LabelFont { factor: 0.7, min_px: 8.0 };
/// Label font factor and floor for the preview card.
pub const PREVIEW_LABEL: LabelFont = LabelFont { factor: 0.8, min_px: 6.0 };

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, delta: Point) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }

    pub fn delta_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scaled(self, scale: f64) -> Size {
        Size::new(self.width * scale, self.height * scale)
    }

    /// Shrinks both sides by `padding`, never below zero.
    pub fn inset(self, padding: f64) -> Size {
        Size::new((self.width - padding).max(0.0), (self.height - padding).max(0.0))
    }
}

/// An axis-aligned rectangle in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Edges are inclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }
}

/// Scale that fits `template` inside `container` without ever magnifying.
///
/// The result is `min(cw / w, ch / h, 1)` and always lies in `[0, 1]`;
/// degenerate sizes collapse to the nearest bound instead of producing NaN.
pub fn fit_scale(container: Size, template: Size) -> f64 {
    let scale_x = container.width / template.width;
    let scale_y = container.height / template.height;
    let scale = scale_x.min(scale_y).min(1.0);
    if scale.is_nan() { 1.0 } else { scale.max(0.0) }
}

/// Maps a client-space point into template space through the canvas origin.
pub fn client_to_template(point: Point, canvas_origin: Point, scale: f64) -> Point {
    if scale <= 0.0 {
        return Point::default();
    }
    Point::new(
        (point.x - canvas_origin.x) / scale,
        (point.y - canvas_origin.y) / scale,
    )
}

/// Keeps a default-sized field box inside the template's right and bottom
/// edges and off the negative axes.
pub fn clamp_to_template(point: Point, template: Size) -> Point {
    Point::new(
        point.x.min(template.width - DEFAULT_FIELD_WIDTH).max(0.0),
        point.y.min(template.height - DEFAULT_FIELD_HEIGHT).max(0.0),
    )
}

/// The on-screen box of a field, relative to the rendered template's corner.
pub fn field_box(field: &FieldMapping, scale: f64) -> Rect {
    Rect::new(
        field.x * scale,
        field.y * scale,
        field.width * scale,
        field.height * scale,
    )
}

/// How a label's font size follows the render scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelFont {
    pub factor: f64,
    pub min_px: f64,
}

impl LabelFont {
    pub fn px(&self, font_size: f64, scale: f64) -> f64 {
        (font_size * scale * self.factor).max(self.min_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scale_is_min_of_axes_and_one() {
        let template = Size::new(1000.0, 600.0);
        assert_eq!(fit_scale(Size::new(500.0, 500.0), template), 0.5);
        assert_eq!(fit_scale(Size::new(2000.0, 240.0), template), 0.4);
        assert_eq!(fit_scale(Size::new(4000.0, 4000.0), template), 1.0);
    }

    #[test]
    fn scale_stays_within_unit_interval() {
        let containers = [
            Size::new(-40.0, 100.0),
            Size::new(0.0, 0.0),
            Size::new(1.0, 1.0e9),
            Size::new(1.0e9, 1.0e9),
        ];
        let templates = [Size::new(1.0, 1.0), Size::new(3000.0, 10.0), Size::new(0.0, 0.0)];
        for container in containers {
            for template in templates {
                let scale = fit_scale(container, template);
                assert!((0.0..=1.0).contains(&scale), "{container:?} {template:?} -> {scale}");
            }
        }
    }

    #[test]
    fn client_point_maps_back_through_origin_and_scale() {
        let origin = Point::new(120.0, 80.0);
        let template_point = client_to_template(Point::new(595.0, 370.0), origin, 0.5);
        assert_eq!(template_point, Point::new(950.0, 580.0));
    }

    #[test]
    fn clamp_keeps_default_box_inside_template() {
        let template = Size::new(1000.0, 600.0);
        assert_eq!(clamp_to_template(Point::new(950.0, 580.0), template), Point::new(900.0, 580.0));
        assert_eq!(clamp_to_template(Point::new(-5.0, 700.0), template), Point::new(0.0, 580.0));
        assert_eq!(clamp_to_template(Point::new(10.0, 10.0), template), Point::new(10.0, 10.0));
    }

    #[test]
    fn clamp_holds_for_scattered_points() {
        let template = Size::new(640.0, 400.0);
        for i in -20..40 {
            let raw = Point::new(i as f64 * 23.7, i as f64 * -17.1 + 300.0);
            let p = clamp_to_template(raw, template);
            assert!(p.x >= 0.0 && p.x <= template.width - DEFAULT_FIELD_WIDTH);
            assert!(p.y >= 0.0 && p.y <= template.height - DEFAULT_FIELD_HEIGHT);
        }
    }

    #[test]
    fn field_box_scales_every_side() {
        let mut field = FieldMapping::new_at("name", 200.0, 100.0);
        field.width = 300.0;
        assert_eq!(field_box(&field, 0.5), Rect::new(100.0, 50.0, 150.0, 10.0));
    }

    #[test]
    fn label_font_has_a_floor() {
        assert_eq!(CANVAS_LABEL.px(12.0, 0.1), 8.0);
        assert!((CANVAS_LABEL.px(40.0, 1.0) - 28.0).abs() < 1e-9);
        assert_eq!(PREVIEW_LABEL.px(12.0, 0.2), 6.0);
    }

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Point::new(10.0, 60.0)));
        assert!(!rect.contains(Point::new(111.0, 20.0)));
    }
}

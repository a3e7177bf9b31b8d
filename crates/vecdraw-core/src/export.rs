//! SVG export of the shape list.

use crate::shapes::{Shape, ShapeStyle};
use std::fmt::Write;
use std::sync::Arc;

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn paint_attrs(style: &ShapeStyle) -> String {
    format!(
        r#"fill="{}" stroke="{}" stroke-width="{}""#,
        escape_xml(&style.fill),
        escape_xml(&style.stroke),
        style.stroke_width
    )
}

/// Render one shape as an SVG element.
pub fn shape_to_svg(shape: &Shape) -> String {
    match shape {
        Shape::Rectangle(r) => {
            let f = r.frame;
            format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
                f.x,
                f.y,
                f.width,
                f.height,
                paint_attrs(&r.style)
            )
        }
        Shape::Ellipse(e) => {
            let c = e.center();
            let (rx, ry) = e.radii();
            format!(
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {}/>"#,
                c.x,
                c.y,
                rx,
                ry,
                paint_attrs(&e.style)
            )
        }
        Shape::Line(l) => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            l.x,
            l.y,
            l.end_x,
            l.end_y,
            paint_attrs(&l.style)
        ),
        Shape::Triangle(t) => {
            let points = t
                .vertices()
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            format!(r#"<polygon points="{}" {}/>"#, points, paint_attrs(&t.style))
        }
        Shape::Text(t) => format!(
            r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="hanging" {}>{}</text>"#,
            t.frame.x,
            t.frame.y,
            t.font_size(),
            paint_attrs(&t.style),
            escape_xml(&t.content)
        ),
        Shape::Pencil(p) => format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            escape_xml(p.path_data()),
            escape_xml(&p.style.stroke),
            p.style.stroke_width
        ),
        Shape::Image(i) => format!(
            r#"<image x="{}" y="{}" width="{}" height="{}" href="{}" preserveAspectRatio="none"/>"#,
            i.frame.x,
            i.frame.y,
            i.frame.width,
            i.frame.height,
            escape_xml(&i.src)
        ),
    }
}

/// Render a whole shape list, bottom to top, as a standalone SVG document.
pub fn to_svg(shapes: &[Arc<Shape>], width: u32, height: u32) -> String {
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    out.push('\n');
    for shape in shapes {
        let _ = writeln!(out, "  {}", shape_to_svg(shape));
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{CanvasPoint, Ellipse, Frame, Image, Pencil, Rectangle, Text, Triangle};

    fn style() -> ShapeStyle {
        ShapeStyle::new("#e9d5ff", "#7c3aed", 2)
    }

    #[test]
    fn test_rect_element() {
        let shape = Shape::Rectangle(Rectangle::new(Frame::new(1, 2, 3, 4), style()));
        assert_eq!(
            shape_to_svg(&shape),
            r##"<rect x="1" y="2" width="3" height="4" fill="#e9d5ff" stroke="#7c3aed" stroke-width="2"/>"##
        );
    }

    #[test]
    fn test_ellipse_element() {
        let shape = Shape::Ellipse(Ellipse::new(Frame::new(50, 50, 100, 60), style()));
        let svg = shape_to_svg(&shape);
        assert!(svg.starts_with(r#"<ellipse cx="100" cy="80" rx="50" ry="30""#));
    }

    #[test]
    fn test_triangle_points() {
        let shape = Shape::Triangle(Triangle::new(Frame::new(0, 0, 10, 10), style()));
        assert!(shape_to_svg(&shape).contains(r#"points="5,0 10,10 0,10""#));
    }

    #[test]
    fn test_text_is_escaped() {
        let shape = Shape::Text(Text::new(CanvasPoint::new(0, 0), "a < b & \"c\"", 20, style()));
        let svg = shape_to_svg(&shape);
        assert!(svg.contains("a &lt; b &amp; &quot;c&quot;</text>"));
        assert!(svg.contains(r#"font-size="20""#));
    }

    #[test]
    fn test_pencil_and_image() {
        let pencil = Pencil::from_points(vec![CanvasPoint::new(0, 0), CanvasPoint::new(5, 5)], style()).unwrap();
        assert!(shape_to_svg(&Shape::Pencil(pencil)).contains(r#"d="M 0 0 L 5 5" fill="none""#));

        let image = Image::new(Frame::new(0, 0, 8, 8), "asset?id=1&v=2", style());
        assert!(shape_to_svg(&Shape::Image(image)).contains(r#"href="asset?id=1&amp;v=2""#));
    }

    #[test]
    fn test_document_keeps_z_order() {
        let a = Arc::new(Shape::Rectangle(Rectangle::new(Frame::new(0, 0, 1, 1), style())));
        let b = Arc::new(Shape::Ellipse(Ellipse::new(Frame::new(0, 0, 2, 2), style())));
        let svg = to_svg(&[a, b], 800, 600);
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600""#));
        let rect_at = svg.find("<rect").unwrap();
        let ellipse_at = svg.find("<ellipse").unwrap();
        assert!(rect_at < ellipse_at);
        assert!(svg.ends_with("</svg>\n"));
    }
}

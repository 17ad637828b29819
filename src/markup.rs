//! SVG markup serialization for fragment lists.

use std::fmt::{self, Write as _};

use crate::layer::{Element, Fragment, Paint};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Side of the normalized drawing canvas.
pub const CANVAS_SIZE: u32 = 100;

/// Writes a complete `<svg>` document.
///
/// `backdrop` prepends a transparent full-canvas rect, which older payloads
/// always carried.
pub fn write_document(
    out: &mut String,
    fragments: &[Fragment],
    width: u32,
    height: u32,
    backdrop: bool,
) -> fmt::Result {
    write!(
        out,
        r#"<svg xmlns="{SVG_NAMESPACE}" viewBox="0 0 {CANVAS_SIZE} {CANVAS_SIZE}" width="{width}" height="{height}">"#
    )?;
    if backdrop {
        write!(out, r#"<rect width="{CANVAS_SIZE}" height="{CANVAS_SIZE}" fill="none"/>"#)?;
    }
    for fragment in fragments {
        write_fragment(out, fragment)?;
    }
    out.push_str("</svg>");
    Ok(())
}

/// Writes one fragment as a single SVG element.
pub fn write_fragment(out: &mut String, fragment: &Fragment) -> fmt::Result {
    match &fragment.element {
        Element::Circle { cx, cy, r } => {
            write!(out, r#"<circle cx="{cx}" cy="{cy}" r="{r}""#)?;
        }
        Element::Ellipse { cx, cy, rx, ry } => {
            write!(out, r#"<ellipse cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}""#)?;
        }
        Element::Rect {
            x,
            y,
            width,
            height,
            rx,
        } => {
            write!(out, r#"<rect x="{x}" y="{y}" width="{width}" height="{height}""#)?;
            if let Some(rx) = rx {
                write!(out, r#" rx="{rx}""#)?;
            }
        }
        Element::Line { x1, y1, x2, y2 } => {
            write!(out, r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}""#)?;
        }
        Element::Path { d } => {
            write!(out, r#"<path d="{}""#, escape_xml(d))?;
        }
        Element::Text {
            x,
            y,
            font_size,
            content,
        } => {
            write!(out, r#"<text x="{x}" y="{y}" font-size="{font_size}""#)?;
            write_paint(out, &fragment.paint)?;
            return write!(out, r#" text-anchor="middle">{}</text>"#, escape_xml(content));
        }
    }
    write_paint(out, &fragment.paint)?;
    out.push_str("/>");
    Ok(())
}

fn write_paint(out: &mut String, paint: &Paint) -> fmt::Result {
    if let Some(fill) = &paint.fill {
        write!(out, r#" fill="{}""#, escape_xml(fill))?;
    }
    if let Some(stroke) = &paint.stroke {
        write!(out, r#" stroke="{}""#, escape_xml(stroke))?;
    }
    if let Some(width) = paint.stroke_width {
        write!(out, r#" stroke-width="{width}""#)?;
    }
    if let Some(opacity) = paint.opacity {
        write!(out, r#" opacity="{opacity}""#)?;
    }
    Ok(())
}

/// Escapes text for use in XML attributes and content.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerKind;

    fn fragment(element: Element, paint: Paint) -> Fragment {
        Fragment {
            layer: LayerKind::Shape,
            rule: "test",
            element,
            paint,
        }
    }

    fn markup(fragment: &Fragment) -> String {
        let mut out = String::new();
        write_fragment(&mut out, fragment).unwrap();
        out
    }

    #[test]
    fn circle_markup() {
        let f = fragment(Element::circle(50.0, 40.0, 30.0), Paint::fill("#f5d0a9"));
        assert_eq!(markup(&f), r##"<circle cx="50" cy="40" r="30" fill="#f5d0a9"/>"##);
    }

    #[test]
    fn fractional_numbers_keep_decimals() {
        let f = fragment(
            Element::circle(40.0, 35.0, 2.5),
            Paint::outline("black", 1.5).with_opacity(0.5),
        );
        assert_eq!(
            markup(&f),
            r#"<circle cx="40" cy="35" r="2.5" fill="none" stroke="black" stroke-width="1.5" opacity="0.5"/>"#
        );
    }

    #[test]
    fn rounded_rect_markup() {
        let f = fragment(
            Element::Rect {
                x: 25.0,
                y: 15.0,
                width: 50.0,
                height: 50.0,
                rx: Some(10.0),
            },
            Paint::fill("#fff"),
        );
        assert_eq!(
            markup(&f),
            r##"<rect x="25" y="15" width="50" height="50" rx="10" fill="#fff"/>"##
        );
    }

    #[test]
    fn text_is_escaped() {
        let f = fragment(
            Element::Text {
                x: 50.0,
                y: 40.0,
                font_size: 10.0,
                content: "<&".into(),
            },
            Paint::fill("#000000"),
        );
        assert_eq!(
            markup(&f),
            r##"<text x="50" y="40" font-size="10" fill="#000000" text-anchor="middle">&lt;&amp;</text>"##
        );
    }

    #[test]
    fn document_wraps_fragments() {
        let mut out = String::new();
        write_document(&mut out, &[], 60, 60, true).unwrap();
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" width="60" height="60"><rect width="100" height="100" fill="none"/></svg>"#
        );
    }
}

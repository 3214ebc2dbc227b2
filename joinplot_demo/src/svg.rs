// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a [`RetainedSurface`] subtree.

use joinplot_core::{Attr, AttrValue, ElementKind, NodeId, RetainedSurface, Surface};
use kurbo::Affine;
use peniko::Color;

/// Serializes `svg` and everything below it as a standalone SVG document.
///
/// Values are read as currently displayed, so an unsettled surface dumps a
/// mid-transition frame.
pub(crate) fn to_svg_string(surface: &RetainedSurface, svg: NodeId) -> String {
    let mut out = String::new();
    if let Ok(size) = surface.client_size(svg) {
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(r#"width="{}" height="{}""#, size.width, size.height));
    } else {
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
    }
    write_attrs(&mut out, surface, svg);
    out.push_str(">\n");
    for &child in surface.children(svg) {
        write_node(&mut out, surface, child, 1);
    }
    out.push_str("</svg>\n");
    out
}

fn write_node(out: &mut String, surface: &RetainedSurface, node: NodeId, depth: usize) {
    let Some(kind) = surface.kind(node) else {
        return;
    };
    let tag = kind.tag();
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}<{tag}"));
    write_attrs(out, surface, node);

    let children = surface.children(node);
    let content = surface
        .displayed_attr(node, Attr::Content)
        .and_then(|v| v.as_text().map(str::to_owned));
    match (kind, content) {
        (ElementKind::Text, Some(text)) => {
            out.push_str(&format!(">{}</{tag}>\n", escape_xml(&text)));
        }
        _ if children.is_empty() => out.push_str("/>\n"),
        _ => {
            out.push_str(">\n");
            for &child in children {
                write_node(out, surface, child, depth + 1);
            }
            out.push_str(&format!("{indent}</{tag}>\n"));
        }
    }
}

fn write_attrs(out: &mut String, surface: &RetainedSurface, node: NodeId) {
    for (attr, _) in surface.attrs(node) {
        let Some(name) = attr.name() else {
            continue;
        };
        let Some(value) = surface.displayed_attr(node, attr) else {
            continue;
        };
        match value {
            AttrValue::Number(n) if attr == Attr::Dy => {
                out.push_str(&format!(r#" {name}="{n}em""#));
            }
            AttrValue::Number(n) => {
                out.push_str(&format!(r#" {name}="{n}""#));
            }
            AttrValue::Text(s) => {
                out.push_str(&format!(r#" {name}="{}""#, escape_xml(&s)));
            }
            AttrValue::Color(c) => write_paint_attr(out, name, c),
            AttrValue::Rect(r) => {
                out.push_str(&format!(
                    r#" {name}="{} {} {} {}""#,
                    r.x0,
                    r.y0,
                    r.width(),
                    r.height()
                ));
            }
            AttrValue::Transform(a) => {
                out.push_str(&format!(r#" {name}="{}""#, svg_transform(a)));
            }
            AttrValue::Dash(d) if d.is_empty() => {}
            AttrValue::Dash(d) => {
                let parts: Vec<String> = d.iter().map(f64::to_string).collect();
                out.push_str(&format!(r#" {name}="{}""#, parts.join(" ")));
            }
            AttrValue::Path(p) => {
                out.push_str(&format!(r#" {name}="{}""#, p.to_svg()));
            }
        }
    }
}

fn svg_transform(a: Affine) -> String {
    let [xx, yx, xy, yy, x, y] = a.as_coeffs();
    if xx == 1.0 && yx == 0.0 && xy == 0.0 && yy == 1.0 {
        format!("translate({x},{y})")
    } else {
        format!("matrix({xx} {yx} {xy} {yy} {x} {y})")
    }
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let rgba = color.to_rgba8();
    out.push_str(&format!(
        r##" {name}="#{:02x}{:02x}{:02x}""##,
        rgba.r, rgba.g, rgba.b
    ));
    if rgba.a != 255 {
        out.push_str(&format!(r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use joinplot_core::RetainedSurface;
    use kurbo::Size;

    use super::*;

    #[test]
    fn dumps_nested_elements_with_typed_attributes() {
        let (mut s, svg) = RetainedSurface::with_svg(Size::new(60.0, 40.0));
        let g = s.create_child(svg, ElementKind::Group).unwrap();
        s.set_attr(g, Attr::Transform, Affine::translate((40.0, 10.0)).into())
            .unwrap();
        let c = s.create_child(g, ElementKind::Circle).unwrap();
        s.set_attr(c, Attr::Fill, Color::from_rgb8(0x1f, 0x77, 0xb4).into())
            .unwrap();
        let t = s.create_child(g, ElementKind::Text).unwrap();
        s.set_attr(t, Attr::Content, "a < b".into()).unwrap();
        s.set_attr(t, Attr::Dy, 0.71.into()).unwrap();

        let out = to_svg_string(&s, svg);
        assert!(out.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="60" height="40""#));
        assert!(out.contains(r#"<g transform="translate(40,10)">"#));
        assert!(out.contains(r##"<circle fill="#1f77b4"/>"##));
        assert!(out.contains(r#"<text dy="0.71em">a &lt; b</text>"#));
        assert!(out.ends_with("</svg>\n"));
    }

    #[test]
    fn rotations_use_a_matrix_and_solid_dashes_are_omitted() {
        let (mut s, svg) = RetainedSurface::with_svg(Size::new(10.0, 10.0));
        let l = s.create_child(svg, ElementKind::Line).unwrap();
        s.set_attr(l, Attr::StrokeDasharray, AttrValue::Dash(Default::default()))
            .unwrap();
        s.set_attr(l, Attr::Transform, Affine::new([0.0, -1.0, 1.0, 0.0, 0.0, 0.0]).into())
            .unwrap();
        let out = to_svg_string(&s, svg);
        assert!(out.contains(r#"<line transform="matrix(0 -1 1 0 0 0)"/>"#));
        assert!(!out.contains("stroke-dasharray"));
    }
}

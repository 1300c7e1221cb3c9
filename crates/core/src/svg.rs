//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use marker_chart_protocol::{Point, Rect, RenderCommand, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette. Clearing a region paints it with the
/// background color, since an SVG document has nothing underneath to reveal.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 120);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    ));

    let bg = resolve_color(ThemeToken::Background, dark);
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#
    ));

    // Open <g> elements, so unbalanced input still yields a well-formed document.
    let mut open = 0usize;
    let mut next_clip = 0usize;

    for cmd in commands {
        match cmd {
            RenderCommand::ClearRect { rect } => {
                push_rect(&mut svg, rect, bg, None, None);
            }
            RenderCommand::FillRect { rect, color } => {
                push_rect(&mut svg, rect, resolve_color(*color, dark), None, None);
            }
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                marker,
            } => {
                let stroke = border_color.map(|c| resolve_color(c, dark));
                push_rect(
                    &mut svg,
                    rect,
                    resolve_color(*color, dark),
                    stroke,
                    marker.map(|m| m.0),
                );
            }
            RenderCommand::FillPath {
                points,
                color,
                border_color,
                marker,
            } => {
                let fill = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<polygon points="{}" fill="{fill}""#,
                    format_points(points)
                ));
                if let Some(stroke) = border_color {
                    svg.push_str(&format!(
                        r#" stroke="{}" stroke-width="1""#,
                        resolve_color(*stroke, dark)
                    ));
                }
                if let Some(marker) = marker {
                    svg.push_str(&format!(r#" data-marker="{}""#, marker.0));
                }
                svg.push_str("/>");
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
            } => {
                let fill = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                ));
            }
            RenderCommand::PushClip { rect } => {
                let id = next_clip;
                next_clip += 1;
                svg.push_str(&format!(
                    r#"<clipPath id="clip{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{id})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
                open += 1;
            }
            RenderCommand::BeginGroup { id } => {
                svg.push_str(&format!(r#"<g id="{}">"#, escape_xml(id)));
                open += 1;
            }
            RenderCommand::PopClip | RenderCommand::EndGroup => {
                if open > 0 {
                    svg.push_str("</g>");
                    open -= 1;
                }
            }
        }
    }

    for _ in 0..open {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

fn push_rect(
    svg: &mut String,
    rect: &Rect,
    fill: &str,
    stroke: Option<&str>,
    marker: Option<u32>,
) {
    svg.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}""#,
        rect.x, rect.y, rect.w, rect.h,
    ));
    if let Some(stroke) = stroke {
        svg.push_str(&format!(r#" stroke="{stroke}" stroke-width="1""#));
    }
    if let Some(marker) = marker {
        svg.push_str(&format!(r#" data-marker="{marker}""#));
    }
    svg.push_str("/>");
}

fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#181818",
            ThemeToken::MarkerFill => "#448aff",
            ThemeToken::MarkerSmallFill => "#82b1ff",
            ThemeToken::MarkerBorder => "#2962ff",
            ThemeToken::MarkerText | ThemeToken::MarkerHighlightText => "#ffffff",
            ThemeToken::MarkerHighlightFill => "#ffd600",
            ThemeToken::MarkerHighlightBorder => "#ffab00",
            ThemeToken::RowHighlight => "#263238",
            ThemeToken::RowSeparator => "#303030",
            ThemeToken::RowLabelText | ThemeToken::BucketText => "#ececec",
            ThemeToken::RowLabelBackground => "#212121",
            ThemeToken::RowLabelHoverBackground => "#37474f",
            ThemeToken::BucketBackground => "#2a2a2a",
        }
    } else {
        match token {
            ThemeToken::Background => "#ffffff",
            ThemeToken::MarkerFill => "#8ac4ff",
            ThemeToken::MarkerSmallFill => "#7990c8",
            ThemeToken::MarkerBorder => "#2488e7",
            ThemeToken::MarkerText => "#000000",
            ThemeToken::MarkerHighlightFill => "#0069aa",
            ThemeToken::MarkerHighlightBorder => "#004e7d",
            ThemeToken::MarkerHighlightText => "#ffffff",
            ThemeToken::RowHighlight => "#edf6ff",
            ThemeToken::RowSeparator => "#e0e0e6",
            ThemeToken::RowLabelText | ThemeToken::BucketText => "#1a1a2e",
            ThemeToken::RowLabelBackground => "#f9f9fa",
            ThemeToken::RowLabelHoverBackground => "#e0e0e6",
            ThemeToken::BucketBackground => "#f0f0f4",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker_chart_protocol::MarkerIndex;

    #[test]
    fn basic_svg_output() {
        let commands = vec![RenderCommand::DrawRect {
            rect: Rect::new(10.0, 20.0, 100.0, 15.0),
            color: ThemeToken::MarkerFill,
            border_color: Some(ThemeToken::MarkerBorder),
            marker: Some(MarkerIndex(7)),
        }];
        let svg = render_svg(&commands, 800.0, 400.0, true);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"data-marker="7""#));
        assert!(svg.contains("#448aff"));
        assert!(svg.contains(r##"stroke="#2962ff""##));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::DrawText {
            position: Point::new(3.0, 11.0),
            text: "fn<T>(&self)".into(),
            color: ThemeToken::MarkerText,
            font_size: 11.0,
        }];
        let svg = render_svg(&commands, 400.0, 100.0, false);
        assert!(svg.contains("fn&lt;T&gt;(&amp;self)"));
    }

    #[test]
    fn clips_and_groups_are_balanced() {
        let commands = vec![
            RenderCommand::BeginGroup { id: "row-1".into() },
            RenderCommand::PushClip {
                rect: Rect::new(150.0, 0.0, 500.0, 64.0),
            },
            RenderCommand::FillPath {
                points: vec![
                    Point::new(0.0, 5.0),
                    Point::new(3.0, 0.0),
                    Point::new(6.0, 5.0),
                ],
                color: ThemeToken::MarkerFill,
                border_color: None,
                marker: None,
            },
            RenderCommand::PopClip,
            RenderCommand::EndGroup,
            // Stray close is ignored.
            RenderCommand::EndGroup,
            // Left open on purpose.
            RenderCommand::BeginGroup { id: "row-2".into() },
        ];
        let svg = render_svg(&commands, 800.0, 64.0, false);
        assert!(svg.contains(r#"<clipPath id="clip0">"#));
        assert!(svg.contains(r#"<polygon points="0,5 3,0 6,5""#));
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
    }
}

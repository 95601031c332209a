use eframe::egui::Color32;

use super::ChartSurface;

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

pub fn render_svg(surface: &ChartSurface) -> String {
    let size = surface.size();
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
        size.x, size.y
    );

    for bubble in surface.bubbles() {
        svg.push_str(&format!(
            "  <g transform=\"translate({:.2},{:.2})\" data-value=\"{}\">\n    <circle r=\"{:.2}\" fill=\"{}\"/>\n    <title>{}</title>\n  </g>\n",
            bubble.position.x,
            bubble.position.y,
            bubble.value,
            bubble.radius,
            hex(bubble.color),
            escape_xml(&bubble.tooltip),
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

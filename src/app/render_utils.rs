use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, surface_frame: Rect, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));
    painter.rect_filled(surface_frame, 0.0, Color32::from_rgb(24, 29, 36));

    let grid_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));
    let step = (50.0 * zoom).max(12.0);

    let mut x = surface_frame.left();
    while x <= surface_frame.right() + 0.5 {
        if x >= rect.left() && x <= rect.right() {
            painter.line_segment(
                [
                    Pos2::new(x, surface_frame.top().max(rect.top())),
                    Pos2::new(x, surface_frame.bottom().min(rect.bottom())),
                ],
                grid_stroke,
            );
        }
        x += step;
    }

    let mut y = surface_frame.top();
    while y <= surface_frame.bottom() + 0.5 {
        if y >= rect.top() && y <= rect.bottom() {
            painter.line_segment(
                [
                    Pos2::new(surface_frame.left().max(rect.left()), y),
                    Pos2::new(surface_frame.right().min(rect.right()), y),
                ],
                grid_stroke,
            );
        }
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// `world` is relative to the chart surface center.
pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

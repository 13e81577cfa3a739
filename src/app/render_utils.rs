use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2};

use crate::config::Canvas;

const CATEGORY_DOMAIN: [&str; 5] = ["Network Server", "Email", "Computer", "Paper/Films", "Other"];
const CATEGORY_RANGE: [Color32; 5] = [
    Color32::from_rgb(0xff, 0x85, 0x85),
    Color32::from_rgb(0x38, 0x95, 0xd3),
    Color32::from_rgb(0xa1, 0xfa, 0x9d),
    Color32::from_rgb(0xff, 0xff, 0xab),
    Color32::from_rgb(0xea, 0xaf, 0xfa),
];

/// Ordinal color scale. Categories outside the known domain are appended in
/// first-seen order and cycle through the range.
pub(super) struct CategoryPalette {
    domain: Vec<String>,
}

impl CategoryPalette {
    pub(super) fn new() -> Self {
        Self {
            domain: CATEGORY_DOMAIN.iter().map(|name| (*name).to_owned()).collect(),
        }
    }

    pub(super) fn color_for(&mut self, category: &str) -> Color32 {
        let index = match self.domain.iter().position(|name| name == category) {
            Some(index) => index,
            None => {
                self.domain.push(category.to_owned());
                self.domain.len() - 1
            }
        };
        CATEGORY_RANGE[index % CATEGORY_RANGE.len()]
    }
}

pub(super) fn darker(color: Color32) -> Color32 {
    const FACTOR: f32 = 0.7;
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * FACTOR).round() as u8,
        (color.g() as f32 * FACTOR).round() as u8,
        (color.b() as f32 * FACTOR).round() as u8,
        color.a(),
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(250, 250, 250));
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Screen pixels per world unit before user zoom, fitting the canvas into `rect`.
pub(super) fn fit_scale(rect: Rect, canvas: Canvas) -> f32 {
    if canvas.width <= 0.0 || canvas.height <= 0.0 {
        return 1.0;
    }
    (rect.width() / canvas.width)
        .min(rect.height() / canvas.height)
        .max(0.05)
}

pub(super) fn world_to_screen(
    rect: Rect,
    pan: Vec2,
    scale: f32,
    origin: Vec2,
    world: Vec2,
) -> Pos2 {
    rect.center() + pan + (world - origin) * scale
}

pub(super) fn screen_to_world(
    rect: Rect,
    pan: Vec2,
    scale: f32,
    origin: Vec2,
    screen: Pos2,
) -> Vec2 {
    origin + (screen - rect.center() - pan) / scale
}

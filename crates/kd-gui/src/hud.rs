//! Heads-up display: stat bars, inventory line, the latest event message,
//! and the incapacitated overlay.

use kd_core::{HudSnapshot, STAT_MAX};
use kd_simulation::{EventLog, SimEventKind};
use macroquad::prelude::*;

use crate::theme::{CANVAS_H, CANVAS_W, palette};

const PANEL_X: f32 = 10.0;
const PANEL_Y: f32 = 10.0;
const PANEL_W: f32 = 220.0;
const PANEL_H: f32 = 104.0;
const BAR_W: f32 = 120.0;
const BAR_H: f32 = 12.0;
const ROW_H: f32 = 20.0;
const FONT_SIZE: f32 = 18.0;

/// One stat row: label, floored value, bar color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatRow {
    /// Short label drawn left of the bar.
    pub label: &'static str,
    /// Integer value shown on the bar.
    pub value: u32,
    /// Fill color.
    pub color: Color,
}

impl StatRow {
    /// Fill fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        (f64::from(self.value) / STAT_MAX).clamp(0.0, 1.0) as f32
    }
}

/// The three stat rows in display order.
pub fn stat_rows(hud: &HudSnapshot) -> [StatRow; 3] {
    [
        StatRow {
            label: "HP",
            value: hud.health,
            color: palette::HEALTH,
        },
        StatRow {
            label: "Food",
            value: hud.hunger,
            color: palette::HUNGER,
        },
        StatRow {
            label: "Water",
            value: hud.thirst,
            color: palette::THIRST,
        },
    ]
}

/// The line under the bars.
pub fn inventory_line(hud: &HudSnapshot) -> String {
    format!(
        "Wood {}  Stone {}  Fires {}",
        hud.wood, hud.stone, hud.campfires
    )
}

/// Description of the most recent event worth showing, if it happened within
/// `linger` ticks of `now`. Spawns are not shown.
pub fn recent_message(events: &EventLog, now: u64, linger: u64) -> Option<&str> {
    events
        .events()
        .iter()
        .rev()
        .take_while(|e| e.tick.saturating_add(linger) >= now)
        .find(|e| !matches!(e.kind, SimEventKind::Spawned { .. }))
        .map(|e| e.description.as_str())
}

fn draw_bar(row: &StatRow, x: f32, y: f32) {
    draw_text(row.label, x, y + BAR_H, FONT_SIZE, palette::TEXT);

    let bar_x = x + 54.0;
    draw_rectangle(bar_x, y, BAR_W, BAR_H, palette::BLACK);
    draw_rectangle_lines(bar_x, y, BAR_W, BAR_H, 1.0, palette::DIM);
    let fill_w = (BAR_W - 2.0) * row.fraction();
    if fill_w > 0.0 {
        draw_rectangle(bar_x + 1.0, y + 1.0, fill_w, BAR_H - 2.0, row.color);
    }

    let value = row.value.to_string();
    let dims = measure_text(&value, None, FONT_SIZE as u16, 1.0);
    draw_text(
        &value,
        bar_x + BAR_W + 6.0,
        y + (BAR_H + dims.offset_y) / 2.0,
        FONT_SIZE,
        palette::TEXT,
    );
}

/// Draw the stat panel in the top-left corner.
pub fn draw_hud(hud: &HudSnapshot, message: Option<&str>) {
    draw_rectangle(PANEL_X, PANEL_Y, PANEL_W, PANEL_H, palette::PANEL);

    let x = PANEL_X + 8.0;
    let mut y = PANEL_Y + 8.0;
    for row in stat_rows(hud) {
        draw_bar(&row, x, y);
        y += ROW_H;
    }
    draw_text(&inventory_line(hud), x, y + 14.0, FONT_SIZE, palette::DIM);

    if let Some(message) = message {
        draw_text(message, x, PANEL_Y + PANEL_H + 20.0, FONT_SIZE, palette::TEXT);
    }
}

/// Hint shown along the bottom edge.
pub fn draw_controls(paused: bool) {
    let text = if paused {
        "PAUSED  (P resume, R restart, Esc quit)"
    } else {
        "WASD move  X chop  Z mine  C craft  P pause  Tab reach"
    };
    draw_text(text, 10.0, CANVAS_H - 10.0, 16.0, palette::DIM);
}

/// Full-canvas overlay once the player has collapsed.
pub fn draw_incapacitated_overlay() {
    draw_rectangle(0.0, 0.0, CANVAS_W, CANVAS_H, palette::PANEL);
    for (text, size, dy) in [
        ("You collapsed", 48.0_f32, 0.0),
        ("Press R to restart", 22.0, 40.0),
    ] {
        let dims = measure_text(text, None, size as u16, 1.0);
        draw_text(
            text,
            (CANVAS_W - dims.width) / 2.0,
            CANVAS_H / 2.0 + dy,
            size,
            palette::TEXT,
        );
    }
}

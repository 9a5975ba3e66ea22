//! UI theme constants.
//!
//! Light palette with the aqua accents of the original Cognitive Mirror
//! styling: aqua interviewer bubbles, sky-blue user bubbles, black text.

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const BG_PRIMARY: Color32 = Color32::from_rgb(240, 248, 250);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(224, 240, 244);
pub const BG_SURFACE: Color32 = Color32::from_rgb(255, 255, 255);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(20, 20, 20);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(90, 102, 108);
pub const ACCENT: Color32 = Color32::from_rgb(0, 170, 180);
pub const SUCCESS: Color32 = Color32::from_rgb(22, 140, 80);
pub const ERROR: Color32 = Color32::from_rgb(200, 50, 50);
pub const WARNING: Color32 = Color32::from_rgb(190, 140, 10);
/// Aqua — interviewer/assistant bubbles
pub const INTERVIEWER_BG: Color32 = Color32::from_rgb(0, 255, 255);
/// Light sky blue — user bubbles
pub const USER_BG: Color32 = Color32::from_rgb(135, 206, 235);
pub const PROFILE_BG: Color32 = Color32::from_rgb(210, 250, 250);
pub const ERROR_BG: Color32 = Color32::from_rgb(250, 225, 225);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(15);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);

/// Apply the light aqua theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = false;
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SECONDARY;
    style.visuals.extreme_bg_color = BG_SURFACE;
    style.visuals.override_text_color = Some(TEXT_PRIMARY);

    style.visuals.widgets.inactive.bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    style.visuals.widgets.hovered.bg_fill = BG_SECONDARY;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.4);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}

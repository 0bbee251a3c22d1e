use crate::egui_app::state::NoticeTone;
use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_rain: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(12, 14, 18),
        bg_secondary: Color32::from_rgb(22, 26, 32),
        bg_tertiary: Color32::from_rgb(38, 44, 54),
        panel_outline: Color32::from_rgb(44, 52, 64),
        text_primary: Color32::from_rgb(196, 204, 214),
        text_muted: Color32::from_rgb(134, 144, 158),
        accent_rain: Color32::from_rgb(104, 170, 230),
        success: Color32::from_rgb(102, 176, 136),
        warning: Color32::from_rgb(214, 168, 82),
        error: Color32::from_rgb(214, 96, 84),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_rain;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_tertiary;
    visuals.error_fg_color = palette.error;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.bg_tertiary;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_rain);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_flat(&mut visuals.widgets.inactive, palette);
    set_flat(&mut visuals.widgets.hovered, palette);
    set_flat(&mut visuals.widgets.active, palette);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.accent_rain);
    visuals.window_corner_radius = CornerRadius::same(2);
    visuals.popup_shadow = Shadow::NONE;
}

fn set_flat(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(2);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.bg_tertiary;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Tone of the footer status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

pub fn status_badge(tone: StatusTone) -> (String, Color32) {
    match tone {
        StatusTone::Idle => ("Idle".into(), Color32::from_rgb(42, 42, 42)),
        StatusTone::Busy => ("Working".into(), Color32::from_rgb(31, 139, 255)),
        StatusTone::Info => ("Info".into(), Color32::from_rgb(64, 140, 112)),
        StatusTone::Warning => ("Warning".into(), Color32::from_rgb(192, 138, 43)),
        StatusTone::Error => ("Error".into(), Color32::from_rgb(192, 57, 43)),
    }
}

/// Fill and text colors for a notice box.
pub fn notice_colors(tone: NoticeTone) -> (Color32, Color32) {
    let palette = palette();
    let accent = match tone {
        NoticeTone::Success => palette.success,
        NoticeTone::Info => palette.accent_rain,
        NoticeTone::Warning => palette.warning,
        NoticeTone::Error => palette.error,
    };
    (accent.gamma_multiply(0.18), accent)
}

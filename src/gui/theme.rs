use eframe::egui::{
    self,
    Color32,
    Visuals,
};

use super::profile_card::RoastClass;
use crate::core::Theme;

/// Light and dark color sets registered with egui up front, so switching
/// the theme only flips which one is active.
#[derive(Clone)]
pub struct Palette {
    dark: PaletteColors,
    light: PaletteColors,
}

impl Default for Palette {
    fn default() -> Self {
        Self::coffee()
    }
}

impl Palette {
    pub fn coffee() -> Self {
        Palette { dark: PaletteColors::espresso(), light: PaletteColors::latte() }
    }

    pub fn colors(&self, theme: Theme) -> &PaletteColors {
        match theme {
            Theme::Dark => &self.dark,
            Theme::Light => &self.light,
        }
    }

    pub fn roast_color(&self, theme: Theme, roast: Option<RoastClass>) -> Color32 {
        let colors = self.colors(theme);
        match roast {
            Some(RoastClass::Light) => colors.roast_light,
            Some(RoastClass::Medium) => colors.roast_medium,
            Some(RoastClass::Dark) => colors.roast_dark,
            None => colors.comment,
        }
    }
}

#[derive(Clone)]
pub struct PaletteColors {
    pub background: Color32,
    pub foreground: Color32,
    pub selection: Color32,
    pub comment: Color32,
    pub red: Color32,
    pub orange: Color32,
    pub green: Color32,
    pub accent: Color32,
    pub roast_light: Color32,
    pub roast_medium: Color32,
    pub roast_dark: Color32,
    pub background_darker: Color32,
    pub background_dark: Color32,
    pub background_light: Color32,
    pub background_lighter: Color32,
}

impl PaletteColors {
    fn espresso() -> Self {
        Self {
            background: Color32::from_rgb(33, 27, 24),
            foreground: Color32::from_rgb(236, 226, 214),
            selection: Color32::from_rgb(78, 61, 52),
            comment: Color32::from_rgb(150, 134, 120),
            red: Color32::from_rgb(240, 110, 100),
            orange: Color32::from_rgb(232, 160, 90),
            green: Color32::from_rgb(120, 200, 120),
            accent: Color32::from_rgb(214, 168, 112),
            roast_light: Color32::from_rgb(201, 156, 98),
            roast_medium: Color32::from_rgb(150, 98, 58),
            roast_dark: Color32::from_rgb(96, 58, 36),
            background_darker: Color32::from_rgb(22, 18, 16),
            background_dark: Color32::from_rgb(28, 23, 20),
            background_light: Color32::from_rgb(48, 40, 35),
            background_lighter: Color32::from_rgb(62, 52, 46),
        }
    }

    fn latte() -> Self {
        Self {
            background: Color32::from_rgb(250, 245, 238),
            foreground: Color32::from_rgb(52, 40, 32),
            selection: Color32::from_rgb(226, 208, 188),
            comment: Color32::from_rgb(140, 122, 108),
            red: Color32::from_rgb(196, 72, 64),
            orange: Color32::from_rgb(204, 120, 48),
            green: Color32::from_rgb(70, 150, 80),
            accent: Color32::from_rgb(150, 98, 58),
            roast_light: Color32::from_rgb(214, 170, 110),
            roast_medium: Color32::from_rgb(160, 106, 62),
            roast_dark: Color32::from_rgb(98, 60, 38),
            background_darker: Color32::from_rgb(232, 224, 214),
            background_dark: Color32::from_rgb(241, 234, 225),
            background_light: Color32::from_rgb(253, 250, 246),
            background_lighter: Color32::from_rgb(255, 255, 255),
        }
    }
}

pub fn egui_theme(theme: Theme) -> egui::Theme {
    match theme {
        Theme::Dark => egui::Theme::Dark,
        Theme::Light => egui::Theme::Light,
    }
}

pub fn set_palette(ctx: &egui::Context, palette: &Palette) {
    ctx.set_visuals_of(egui::Theme::Dark, palette_visuals(&palette.dark, Visuals::dark()));
    ctx.set_visuals_of(egui::Theme::Light, palette_visuals(&palette.light, Visuals::light()));
}

/// Switches egui to the variant for `theme`.
pub fn apply_theme(ctx: &egui::Context, theme: Theme) {
    ctx.set_theme(egui_theme(theme));
}

/// Recolors `base` with `colors`, keeping its sizes, rounding and
/// `dark_mode` flag.
fn palette_visuals(colors: &PaletteColors, base: Visuals) -> Visuals {
    let mut visuals = base;

    let widgets = &mut visuals.widgets;
    for (widget, fill, weak_fill, stroke) in [
        (&mut widgets.noninteractive, colors.background, colors.background_lighter, colors.background_lighter),
        (&mut widgets.inactive, colors.background_light, colors.background_lighter, colors.background_dark),
        (&mut widgets.hovered, colors.selection, colors.selection, colors.accent),
        (&mut widgets.active, colors.selection, colors.background_light, colors.accent),
        (&mut widgets.open, colors.background_dark, colors.background_lighter, colors.accent),
    ] {
        widget.bg_fill = fill;
        widget.weak_bg_fill = weak_fill;
        widget.bg_stroke.color = stroke;
        widget.fg_stroke.color = colors.foreground;
    }

    visuals.selection.bg_fill = colors.selection;
    visuals.selection.stroke.color = colors.foreground;
    visuals.hyperlink_color = colors.accent;
    visuals.faint_bg_color = colors.background_light;
    visuals.extreme_bg_color = colors.background_darker;
    visuals.code_bg_color = colors.background_dark;
    visuals.error_fg_color = colors.red;
    visuals.warn_fg_color = colors.orange;
    visuals.window_fill = colors.background;
    visuals.window_stroke.color = colors.background_light;
    visuals.window_shadow.color = colors.background_darker;
    visuals.panel_fill = colors.background_dark;
    visuals.popup_shadow.color = colors.background_dark;
    visuals
}

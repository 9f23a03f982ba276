//! Presentation of a single profile.
//!
//! [`CardModel`] holds everything a card displays, derived from the free-form
//! profile fields. [`show`] only lays it out.

use eframe::egui::{
    self,
    RichText,
};

use super::theme::Palette;
use crate::core::{
    models::{
        FIELD_BREW_RATIO,
        FIELD_BREW_TIME,
        FIELD_DESCRIPTION,
        FIELD_GRIND_SIZE,
        FIELD_NAME,
        FIELD_NOTES,
        FIELD_PROCESS,
        FIELD_RATIO,
        FIELD_ROAST,
        FIELD_SOURCE,
        FIELD_TEMPERATURE,
    },
    CoffeeProfile,
    Theme,
};

pub const CARD_WIDTH: f32 = 280.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoastClass {
    Light,
    Medium,
    Dark,
}

impl RoastClass {
    /// Case-insensitive. Checked in dark, light, medium order, so
    /// "Medium-Dark" is dark.
    pub fn from_roast(roast: &str) -> Option<Self> {
        let roast = roast.to_lowercase();
        if roast.contains("dark") {
            Some(RoastClass::Dark)
        } else if roast.contains("light") {
            Some(RoastClass::Light)
        } else if roast.contains("medium") {
            Some(RoastClass::Medium)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrewParam {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardModel {
    pub title: String,
    pub source: String,
    pub roast: Option<String>,
    pub roast_class: Option<RoastClass>,
    pub process: Option<String>,
    pub description: Option<String>,
    pub notes: Vec<String>,
    pub brew_params: Vec<BrewParam>,
}

fn present(profile: &CoffeeProfile, field: &str) -> Option<String> {
    profile.get(field).map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl CardModel {
    pub fn from_profile(profile: &CoffeeProfile) -> Self {
        let roast = present(profile, FIELD_ROAST);
        let roast_class = roast.as_deref().and_then(RoastClass::from_roast);

        let notes = profile
            .value(FIELD_NOTES)
            .split(',')
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_string)
            .collect();

        let ratio = present(profile, FIELD_BREW_RATIO).or_else(|| present(profile, FIELD_RATIO));
        let brew_params = [
            ("Temperature", present(profile, FIELD_TEMPERATURE)),
            ("Grind Size", present(profile, FIELD_GRIND_SIZE)),
            ("Ratio", ratio),
            ("Brew Time", present(profile, FIELD_BREW_TIME)),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|value| BrewParam { label, value }))
        .collect();

        Self {
            title: present(profile, FIELD_NAME).unwrap_or_else(|| "Unnamed Coffee".to_string()),
            source: present(profile, FIELD_SOURCE).unwrap_or_else(|| "Unknown Source".to_string()),
            roast,
            roast_class,
            process: present(profile, FIELD_PROCESS),
            description: present(profile, FIELD_DESCRIPTION),
            notes,
            brew_params,
        }
    }

    pub fn has_brew_params(&self) -> bool {
        !self.brew_params.is_empty()
    }
}

pub fn show(ui: &mut egui::Ui, card: &CardModel, palette: &Palette, theme: Theme) {
    let colors = palette.colors(theme);
    let roast_color = palette.roast_color(theme, card.roast_class);

    egui::Frame::group(ui.style())
        .fill(colors.background)
        .stroke(egui::Stroke::new(1.0, colors.background_lighter))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&card.title).size(17.0).strong().color(colors.foreground));
                    ui.label(RichText::new(&card.source).color(colors.comment));
                });
                if let Some(roast) = &card.roast {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        egui::Frame::new()
                            .fill(roast_color)
                            .corner_radius(10.0)
                            .inner_margin(egui::Margin::symmetric(8, 2))
                            .show(ui, |ui| {
                                ui.label(RichText::new(roast).small().color(egui::Color32::WHITE));
                            });
                    });
                }
            });

            if let Some(process) = &card.process {
                ui.small(format!("Process: {process}"));
            }

            if let Some(description) = &card.description {
                ui.add_space(4.0);
                ui.label(description);
            }

            if !card.notes.is_empty() {
                ui.add_space(6.0);
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 4.0;
                    for note in &card.notes {
                        egui::Frame::new()
                            .fill(colors.selection)
                            .corner_radius(6.0)
                            .inner_margin(egui::Margin::symmetric(6, 2))
                            .show(ui, |ui| {
                                ui.label(RichText::new(note).small());
                            });
                    }
                });
            }

            if card.has_brew_params() {
                ui.add_space(8.0);
                ui.separator();
                egui::Grid::new(ui.next_auto_id()).num_columns(2).spacing([12.0, 2.0]).show(
                    ui,
                    |ui| {
                        for param in &card.brew_params {
                            ui.label(RichText::new(param.label).small().color(colors.comment));
                            ui.label(RichText::new(&param.value).strong());
                            ui.end_row();
                        }
                    },
                );
            }
        });
}

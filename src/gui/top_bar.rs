use eframe::egui::{
    self,
    containers,
    RichText,
};

use super::theme::PaletteColors;
use crate::{
    core::Theme,
    store::ProfileState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopBarAction {
    ToggleTheme,
    ToggleDataSource,
    Refresh,
    Download,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        state: &ProfileState,
        colors: &PaletteColors,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                ui.label(RichText::new("☕ Aiden Coffee Profiles").strong().color(colors.accent));
                ui.separator();

                let refresh_text = if state.loading { "Refreshing..." } else { "Refresh Profiles" };
                if ui.add_enabled(!state.loading, egui::Button::new(refresh_text)).clicked() {
                    action = Some(TopBarAction::Refresh);
                }

                let theme_text = match state.theme {
                    Theme::Dark => "Light mode",
                    Theme::Light => "Dark mode",
                };
                if ui.button(theme_text).clicked() {
                    action = Some(TopBarAction::ToggleTheme);
                }

                ui.menu_button("Data", |ui| {
                    let mut use_local = state.use_local_data;
                    if ui.checkbox(&mut use_local, "Use locally stored data").changed() {
                        action = Some(TopBarAction::ToggleDataSource);
                    }

                    let download = ui
                        .add_enabled(!state.downloading, egui::Button::new("Download for offline use"))
                        .on_hover_text(&state.spreadsheet_url);
                    if download.clicked() {
                        action = Some(TopBarAction::Download);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status_indicators(ui, state, colors);
                });
            });
        });

        action
    }

    fn show_status_indicators(ui: &mut egui::Ui, state: &ProfileState, colors: &PaletteColors) {
        if state.downloading || state.download_progress > 0 {
            ui.add(
                egui::ProgressBar::new(f32::from(state.download_progress) / 100.0)
                    .desired_width(120.0)
                    .show_percentage(),
            );
        } else if let Some(error) = &state.download_error {
            ui.small(RichText::new("Download failed").color(colors.red)).on_hover_text(error);
        }

        ui.add_space(3.0);

        let online_color = if state.online_data_available { colors.green } else { colors.red };
        let online_tooltip = if state.online_data_available {
            "Fresh data was fetched this session"
        } else {
            "No fresh data fetched yet"
        };
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small(RichText::new("●").color(online_color)).on_hover_text(online_tooltip);
            ui.small(if state.use_local_data { "Local" } else { "Online" })
                .on_hover_text(online_tooltip);
        });
    }
}

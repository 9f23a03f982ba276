use eframe::egui;

use crate::gui::theme::PaletteColors;

/// Dims the window and shows a spinner with a message while a load runs.
pub struct MessageOverlay {
    pub active: bool,
    pub message: Option<String>,
}

impl MessageOverlay {
    pub fn new() -> Self {
        Self { active: false, message: None }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.active = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
        self.active = false;
    }

    /// Shown exactly while a profile load is pending.
    pub fn follow_loading(&mut self, loading: bool) {
        if loading {
            self.set_message("Loading profiles...");
        } else {
            self.clear_message();
        }
    }

    pub fn show(&self, ctx: &egui::Context, colors: &PaletteColors) {
        if !self.active {
            return;
        }

        egui::Area::new(egui::Id::new("message_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::Pos2::new(0.0, 0.0))
            .show(ctx, |ui| {
                let screen_rect = ui.ctx().screen_rect();
                ui.allocate_space(screen_rect.size());
                ui.painter().rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(120));
            });

        let message = self.message.as_deref().unwrap_or("Loading...");

        egui::Window::new("message_box")
            .order(egui::Order::Foreground)
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .fixed_size(egui::Vec2::new(220.0, 90.0))
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(colors.background)
                    .stroke(egui::Stroke::new(2.0, colors.accent)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.add(egui::Spinner::new());
                    ui.label(message);
                });
            });
    }
}

impl Default for MessageOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::AppConfig,
        persistence::MemoryStore,
        store::ProfileStore,
    };

    #[test]
    fn overlay_tracks_pending_load() {
        let mut overlay = MessageOverlay::new();
        let mut store = ProfileStore::new(MemoryStore::new(), &AppConfig::default());

        let ticket = store.begin_load().unwrap();
        overlay.follow_loading(store.state().loading);
        assert!(overlay.active);
        assert_eq!(overlay.message.as_deref(), Some("Loading profiles..."));

        store.finish_load(ticket, Ok("name,source\nX,Y".to_string()));
        overlay.follow_loading(store.state().loading);
        assert!(!overlay.active);
    }

    #[test]
    fn cached_shortcut_leaves_overlay_clear() {
        let storage = MemoryStore::with_entries([
            ("use_local_data", "true"),
            ("local_profiles", r#"[{"id":"k","name":"Kenya AA","source":"Kenya"}]"#),
        ]);
        let mut store = ProfileStore::new(storage, &AppConfig::default());
        let mut overlay = MessageOverlay::new();
        overlay.set_message("Loading profiles...");

        assert!(store.begin_load().is_none());
        overlay.follow_loading(store.state().loading);
        assert!(!overlay.active);
        assert_eq!(overlay.message, None);
    }
}

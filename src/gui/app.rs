use std::time::{
    Duration,
    Instant,
};

use eframe::egui::{
    self,
    RichText,
};

use super::{
    message_overlay::MessageOverlay,
    profile_card::{
        self,
        CardModel,
        CARD_WIDTH,
    },
    source_filter::SourceFilter,
    theme::{
        apply_theme,
        set_palette,
        Palette,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        AppConfig,
        ProfileError,
    },
    persistence::KeyValueStore,
    store::ProfileStore,
};

const PENDING_REPAINT: Duration = Duration::from_millis(100);

pub struct CoffeeApp<S: KeyValueStore> {
    store: ProfileStore<S>,
    config: AppConfig,

    // UI State
    palette: Palette,
    message_overlay: MessageOverlay,
    download_finished_at: Option<Instant>,

    task_manager: Option<TaskManager>,
}

impl<S: KeyValueStore> CoffeeApp<S> {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: ProfileStore<S>,
        config: AppConfig,
        task_manager: Option<TaskManager>,
    ) -> Self {
        let mut app = Self {
            store,
            config,
            palette: Palette::default(),
            message_overlay: MessageOverlay::new(),
            download_finished_at: None,
            task_manager,
        };

        set_palette(&cc.egui_ctx, &app.palette);
        apply_theme(&cc.egui_ctx, app.store.state().theme);

        app.start_load();
        app
    }

    fn start_load(&mut self) {
        if let Some(ticket) = self.store.begin_load() {
            let spawned = match &self.task_manager {
                Some(task_manager) => task_manager.fetch_profiles(&ticket),
                None => Err(ProfileError::TaskFailed("background runtime unavailable".to_string())),
            };

            if let Err(e) = spawned {
                self.store.abort_load(ticket, e);
            }
        }

        self.message_overlay.follow_loading(self.store.state().loading);
    }

    fn start_download(&mut self) {
        let Some(ticket) = self.store.begin_download() else {
            return;
        };
        self.download_finished_at = None;

        let spawned = match &self.task_manager {
            Some(task_manager) => task_manager.download_profiles(&ticket),
            None => Err(ProfileError::TaskFailed("background runtime unavailable".to_string())),
        };

        if let Err(e) = spawned {
            self.store.finish_download(ticket, Err(e));
            self.download_finished_at = Some(Instant::now());
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        tracing::debug!("Task result: {}", result.task_type());

        match result {
            TaskResult::ProfilesFetched { ticket, fetched } => {
                self.store.finish_load(ticket, fetched);
                self.message_overlay.follow_loading(self.store.state().loading);
            }
            TaskResult::LoadAborted { ticket, error } => {
                self.store.abort_load(ticket, error);
                self.message_overlay.follow_loading(self.store.state().loading);
            }
            TaskResult::DownloadProgress(percent) => self.store.set_download_progress(percent),
            TaskResult::Downloaded { ticket, fetched } => {
                self.store.finish_download(ticket, fetched);
                self.download_finished_at = Some(Instant::now());
            }
        }
    }

    fn handle_top_bar_action(&mut self, action: TopBarAction, ctx: &egui::Context) {
        match action {
            TopBarAction::ToggleTheme => {
                let theme = self.store.toggle_theme();
                apply_theme(ctx, theme);
            }
            TopBarAction::ToggleDataSource => {
                self.store.toggle_data_source();
                self.start_load();
            }
            TopBarAction::Refresh => self.start_load(),
            TopBarAction::Download => self.start_download(),
        }
    }

    fn expire_download_progress(&mut self) {
        if let Some(finished_at) = self.download_finished_at {
            if finished_at.elapsed() >= self.config.download_reset_delay() {
                self.store.reset_download_progress();
                self.download_finished_at = None;
            }
        }
    }

    fn show_profiles(&mut self, ui: &mut egui::Ui) {
        let state = self.store.state();
        let colors = self.palette.colors(state.theme);

        let picked = SourceFilter::show(ui, &state.sources, &state.selected_source);

        if let Some(error) = &state.error {
            ui.add_space(6.0);
            egui::Frame::new()
                .fill(colors.background_light)
                .stroke(egui::Stroke::new(1.0, colors.orange))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(error).color(colors.orange));
                });
        }

        ui.add_space(8.0);

        let profiles = state.filtered_profiles();
        if profiles.is_empty() && !state.loading {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(RichText::new("No coffee profiles found").size(16.0).color(colors.comment));
                if state.has_profiles() {
                    ui.small("Try another source.");
                }
            });
        } else {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                    for profile in &profiles {
                        ui.allocate_ui(egui::vec2(CARD_WIDTH + 30.0, 0.0), |ui| {
                            let card = CardModel::from_profile(profile);
                            profile_card::show(ui, &card, &self.palette, state.theme);
                        });
                    }
                });
            });
        }

        if let Some(source) = picked {
            self.store.set_source(source);
        }
    }

    fn show_footer(&self, ctx: &egui::Context) {
        let state = self.store.state();
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Made for the Aiden Brewer");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let updated = state.last_updated.as_deref().unwrap_or("never");
                    ui.small(format!("Last updated: {updated}"));
                });
            });
        });
    }
}

impl<S: KeyValueStore> eframe::App for CoffeeApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let task_results =
            self.task_manager.as_mut().map(TaskManager::poll_results).unwrap_or_default();

        for result in task_results {
            self.handle_task_result(result);
        }
        self.expire_download_progress();

        let colors = self.palette.colors(self.store.state().theme).clone();
        if let Some(action) = TopBar::show(ctx, self.store.state(), &colors) {
            self.handle_top_bar_action(action, ctx);
        }

        self.show_footer(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_profiles(ui);
        });

        self.message_overlay.show(ctx, &colors);

        let state = self.store.state();
        if state.loading || state.downloading || self.download_finished_at.is_some() {
            ctx.request_repaint_after(PENDING_REPAINT);
        }
    }
}

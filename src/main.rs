use coffee_profiles::{
    core::tasks::TaskManager,
    gui::CoffeeApp,
    persistence::FileStore,
    AppConfig,
    ProfileStore,
};
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load();
    let storage = FileStore::open_default();
    tracing::info!("Using storage at {}", storage.path().display());

    let task_manager = match TaskManager::new(&config) {
        Ok(task_manager) => Some(task_manager),
        Err(e) => {
            tracing::error!("Failed to start background tasks: {e}");
            None
        }
    };
    let store = ProfileStore::new(storage, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Aiden Coffee Profiles")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Aiden Coffee Profiles",
        options,
        Box::new(|cc| Ok(Box::new(CoffeeApp::new(cc, store, config, task_manager)))),
    )
}

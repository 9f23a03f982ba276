pub mod app;
pub mod message_overlay;
pub mod profile_card;
pub mod source_filter;
pub mod theme;
pub mod top_bar;

pub use app::CoffeeApp;

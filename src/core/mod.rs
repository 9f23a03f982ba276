pub mod config;
pub mod constants;
pub mod csv;
pub mod errors;
pub mod http;
pub mod models;
pub mod profiles;
pub mod sample_data;
pub mod tasks;

pub use config::AppConfig;
pub use errors::ProfileError;
pub use models::{
    CoffeeProfile,
    Row,
    Theme,
};

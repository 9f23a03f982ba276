pub mod core;
pub mod gui;
pub mod persistence;
pub mod store;

pub use crate::core::{
    AppConfig,
    CoffeeProfile,
    ProfileError,
};
pub use crate::store::{
    ProfileState,
    ProfileStore,
};

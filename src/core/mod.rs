#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod image;
pub mod model;
pub mod tr;

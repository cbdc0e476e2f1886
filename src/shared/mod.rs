/// Shared modules used across the application
pub mod config;
pub mod theme;

// Re-export commonly used items
pub use config::{Config, ThemeMode};
pub use theme::{Icons, Theme};

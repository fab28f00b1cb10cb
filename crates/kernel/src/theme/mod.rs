//! Theme engine and template rendering.
//!
//! Provides Tera-based rendering of the site frame with template suggestion
//! resolution.

mod engine;

pub use engine::{SharedThemeEngine, ThemeEngine};

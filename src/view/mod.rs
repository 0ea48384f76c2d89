//! Presentation: classifications, pt-BR formatting and text rendering.

pub mod format;
pub mod levels;
pub mod render;

pub use format::{format_brl, format_count, format_percent};
pub use levels::{PresenceLevel, ScoreLevel, SocialPlatform};
pub use render::render;

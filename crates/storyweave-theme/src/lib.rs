//! Storyweave — Theme Inference.
//!
//! Maps accumulated narrative text to a thematic category that the
//! presentation layer uses for styling. Pure and deterministic; this crate
//! has no I/O and no dependency on the session engine.

pub mod category;
pub mod inference;

pub use category::{ParseThemeError, Theme};
pub use inference::{FANTASY_WORDS, SCIFI_WORDS, ThemeScore, infer_theme};

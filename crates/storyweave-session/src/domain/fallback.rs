//! Scripted narrator turns used when the generation backend fails.

use storyweave_theme::Theme;

/// Narrator turn substituted when opening a story fails.
pub const START_FALLBACK_CONTINUATION: &str = "In the depths of the Crystalline Caverns, where ancient magic still pulses through veins of luminescent stone, you find yourself standing at the threshold of an impossible choice. The air shimmers with ethereal energy, and whispers of long-forgotten spells echo through the corridors ahead.";

/// Theme applied when opening a story fails.
pub const START_FALLBACK_THEME: Theme = Theme::Fantasy;

/// Narrator turn substituted when continuing a story fails.
pub const CONTINUE_FALLBACK_CONTINUATION: &str = "The path you've chosen leads deeper into the unknown, where reality bends and new possibilities unfold...";

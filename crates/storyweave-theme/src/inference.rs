//! Keyword-count theme inference.
//!
//! Each keyword set is checked by plain substring containment against the
//! lower-cased text, so a keyword buried inside a longer word still counts.
//! Only distinct keywords are counted, never repeat occurrences.

use crate::category::Theme;

/// Keywords that signal a fantasy story.
pub const FANTASY_WORDS: [&str; 10] = [
    "magic", "wizard", "dragon", "castle", "sword", "potion", "spell", "enchanted", "mystical",
    "realm",
];

/// Keywords that signal a science-fiction story. Stored lowercase.
pub const SCIFI_WORDS: [&str; 10] = [
    "robot", "space", "laser", "cyber", "tech", "ai", "quantum", "neural", "digital", "hologram",
];

/// Distinct keyword hits per category for one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeScore {
    /// Number of distinct fantasy keywords present.
    pub fantasy: usize,
    /// Number of distinct scifi keywords present.
    pub scifi: usize,
}

impl ThemeScore {
    /// Scores `text` against both keyword sets.
    #[must_use]
    pub fn of(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Self {
            fantasy: count_present(&lowered, &FANTASY_WORDS),
            scifi: count_present(&lowered, &SCIFI_WORDS),
        }
    }

    /// Applies the decision rule. Ties, including 0-0, are neutral.
    #[must_use]
    pub fn theme(self) -> Theme {
        if self.fantasy > self.scifi && self.fantasy > 0 {
            Theme::Fantasy
        } else if self.scifi > self.fantasy && self.scifi > 0 {
            Theme::Scifi
        } else {
            Theme::Neutral
        }
    }
}

fn count_present(lowered: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|word| lowered.contains(*word)).count()
}

/// Infers the thematic category of `text`.
#[must_use]
pub fn infer_theme(text: &str) -> Theme {
    ThemeScore::of(text).theme()
}

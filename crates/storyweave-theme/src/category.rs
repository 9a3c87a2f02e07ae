//! The thematic categories a story can be in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inferred thematic category of a story.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Swords, spells and dragons.
    Fantasy,
    /// Robots, lasers and space.
    Scifi,
    /// No dominant theme.
    #[default]
    Neutral,
}

impl Theme {
    /// Returns the lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fantasy => "fantasy",
            Self::Scifi => "scifi",
            Self::Neutral => "neutral",
        }
    }

    /// Returns `true` for [`Theme::Neutral`].
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self == Self::Neutral
    }

    /// Folds a newly inferred theme into the current one.
    ///
    /// A non-neutral inference always wins; a neutral inference never
    /// reverts an established theme.
    #[must_use]
    pub fn absorb(self, inferred: Self) -> Self {
        if inferred.is_neutral() { self } else { inferred }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `fantasy`, `scifi`, `neutral`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme: {0:?}")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fantasy" => Ok(Self::Fantasy),
            "scifi" => Ok(Self::Scifi),
            "neutral" => Ok(Self::Neutral),
            other => Err(ParseThemeError(other.to_owned())),
        }
    }
}

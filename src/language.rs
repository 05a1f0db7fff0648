//! # Language Module
//!
//! The fixed set of output languages supported for recipe generation,
//! speech recognition and video search, plus the dietary classes used to
//! bias generation prompts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output language for generated recipes and localized messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Telugu,
    Tamil,
    Hindi,
    Kannada,
    Malayalam,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Telugu,
        Language::Tamil,
        Language::Hindi,
        Language::Kannada,
        Language::Malayalam,
    ];

    /// Lower-case English name, as embedded in generation prompts
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Telugu => "telugu",
            Language::Tamil => "tamil",
            Language::Hindi => "hindi",
            Language::Kannada => "kannada",
            Language::Malayalam => "malayalam",
        }
    }

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Telugu => "te",
            Language::Tamil => "ta",
            Language::Hindi => "hi",
            Language::Kannada => "kn",
            Language::Malayalam => "ml",
        }
    }

    /// Locale handed to the speech recognizer
    pub fn speech_locale(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Telugu => "te-IN",
            Language::Tamil => "ta-IN",
            Language::Hindi => "hi-IN",
            Language::Kannada => "kn-IN",
            Language::Malayalam => "ml-IN",
        }
    }

    /// Word appended to video searches so results come back in this language
    pub fn recipe_search_term(&self) -> &'static str {
        match self {
            Language::English => "recipe",
            Language::Telugu => "వంటకం recipe",
            Language::Tamil => "சமையல் recipe",
            Language::Hindi => "व्यंजन recipe",
            Language::Kannada => "ವ್ಯಂಜನ recipe",
            Language::Malayalam => "പാചകക്കുറിപ്പ് recipe",
        }
    }

    /// Native-script display name
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Telugu => "తెలుగు",
            Language::Tamil => "தமிழ்",
            Language::Hindi => "हिंदी",
            Language::Kannada => "ಕನ್ನಡ",
            Language::Malayalam => "മലയാളം",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a language or dietary tag is not recognised
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownTagError(pub String);

impl fmt::Display for UnknownTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown tag: {}", self.0)
    }
}

impl std::error::Error for UnknownTagError {}

impl FromStr for Language {
    type Err = UnknownTagError;

    /// Accepts English names or ISO codes, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.name() == wanted || lang.code() == wanted)
            .ok_or_else(|| UnknownTagError(s.to_string()))
    }
}

/// Dietary class used to bias generation prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dietary {
    #[serde(rename = "veg")]
    Veg,
    #[serde(rename = "non-veg")]
    NonVeg,
}

impl Dietary {
    /// Label used inside prompts
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Dietary::Veg => "Vegetarian",
            Dietary::NonVeg => "Non-Vegetarian",
        }
    }
}

impl fmt::Display for Dietary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dietary::Veg => f.write_str("veg"),
            Dietary::NonVeg => f.write_str("non-veg"),
        }
    }
}

impl FromStr for Dietary {
    type Err = UnknownTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "veg" | "vegetarian" => Ok(Dietary::Veg),
            "non-veg" | "nonveg" | "non-vegetarian" => Ok(Dietary::NonVeg),
            _ => Err(UnknownTagError(s.to_string())),
        }
    }
}

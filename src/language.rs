//! Locales the trending view can be driven by.
//!
//! The catalog has no trending endpoint, so every language carries a fixed,
//! ordered list of keyword queries that act as a proxy for "what is popular
//! right now" in that market. The order matters: earlier queries win when the
//! same track shows up under several keywords.

use std::{fmt, str::FromStr};

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Tamil,
    Telugu,
    Punjabi,
    Spanish,
    Korean,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Hindi,
        Language::Tamil,
        Language::Telugu,
        Language::Punjabi,
        Language::Spanish,
        Language::Korean,
        Language::Japanese,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Tamil => "tamil",
            Language::Telugu => "telugu",
            Language::Punjabi => "punjabi",
            Language::Spanish => "spanish",
            Language::Korean => "korean",
            Language::Japanese => "japanese",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी (Hindi)",
            Language::Tamil => "தமிழ் (Tamil)",
            Language::Telugu => "తెలుగు (Telugu)",
            Language::Punjabi => "ਪੰਜਾਬੀ (Punjabi)",
            Language::Spanish => "Español (Spanish)",
            Language::Korean => "한국어 (Korean)",
            Language::Japanese => "日本語 (Japanese)",
        }
    }

    /// Keyword queries used as the trending proxy, in priority order.
    pub fn trending_queries(self) -> &'static [&'static str] {
        match self {
            Language::English => &[
                "top hits",
                "viral hits",
                "pop hits",
                "trending now",
                "new music friday",
            ],
            Language::Hindi => &[
                "bollywood hits",
                "hindi top songs",
                "arijit singh",
                "bollywood new releases",
                "hindi romantic",
            ],
            Language::Tamil => &[
                "tamil hits",
                "kollywood",
                "anirudh",
                "tamil new songs",
            ],
            Language::Telugu => &[
                "telugu hits",
                "tollywood",
                "telugu new songs",
                "devi sri prasad",
            ],
            Language::Punjabi => &[
                "punjabi hits",
                "punjabi top songs",
                "diljit dosanjh",
                "bhangra",
                "punjabi new releases",
            ],
            Language::Spanish => &[
                "reggaeton",
                "latin hits",
                "exitos",
                "musica urbana",
                "pop latino",
                "bachata",
            ],
            Language::Korean => &["k-pop", "kpop hits", "korean ballad", "k-pop new releases"],
            Language::Japanese => &["j-pop", "anime songs", "japanese hits", "city pop"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.code() == wanted)
            .ok_or_else(|| format!("unknown language '{}'", s.trim()))
    }
}

//! content ratings
use {
    crate::error::FinderError,
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// A content rating filter for a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rating {
    /// safe for work
    #[default]
    #[serde(rename = "s")]
    Safe,
    /// questionable
    #[serde(rename = "q")]
    Questionable,
    /// explicit
    #[serde(rename = "e")]
    Explicit,
    /// no rating filter
    #[serde(rename = "all")]
    Unrestricted,
}

impl Rating {
    /// every rating that maps to an api rating code
    pub const LEVELS: [Rating; 3] = [Rating::Safe, Rating::Questionable, Rating::Explicit];

    /// the code used by the api and in settings files
    pub fn code(&self) -> &'static str {
        match self {
            Self::Safe => "s",
            Self::Questionable => "q",
            Self::Explicit => "e",
            Self::Unrestricted => "all",
        }
    }

    /// the human readable label, `None` for [`Rating::Unrestricted`]
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Safe => Some("Safe"),
            Self::Questionable => Some("Questionable"),
            Self::Explicit => Some("Explicit"),
            Self::Unrestricted => None,
        }
    }

    /// the `rating:<code>` search tag, `None` when unrestricted
    pub fn search_tag(&self) -> Option<String> {
        match self {
            Self::Unrestricted => None,
            rating => Some(format!("rating:{}", rating.code())),
        }
    }

    /// look up the display label for a rating code found on a post
    pub fn label_for_code(code: &str) -> Option<&'static str> {
        code.parse::<Rating>().ok().and_then(|r| r.label())
    }
}

impl FromStr for Rating {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "safe" => Ok(Self::Safe),
            "q" | "questionable" => Ok(Self::Questionable),
            "e" | "explicit" => Ok(Self::Explicit),
            "all" => Ok(Self::Unrestricted),
            _ => Err(FinderError::InvalidRating(s.to_string())),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// list every rating level as `[S]afe`, `[Q]uestionable`... joined by `separator`
pub fn compose_rating_map(separator: &str) -> String {
    Rating::LEVELS
        .iter()
        .filter_map(|r| r.label())
        .map(|label| {
            let mut chars = label.chars();
            match chars.next() {
                Some(first) => format!("[{}]{}", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

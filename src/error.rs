//! error handling stuff
use thiserror::Error;

#[derive(Debug, Error)]
/// An error
///
/// The first group of variants are expected outcomes of a chat request and their
/// `Display` text is sent back to the user as-is.
pub enum FinderError {
    /// the api could not be reached
    #[error("request failed: server network problem")]
    Network,

    /// the api answered with something that isn't json
    #[error("request failed: the API returned no post data")]
    NoPostData,

    /// the api reported a failure or an empty result set
    #[error("no post matched your tags")]
    NoPostFound,

    /// the api answered with an unexpected status code
    #[error("request failed: invalid response from the API (status {0})")]
    BadStatus(u16),

    /// the requested number of posts per page is out of bounds
    #[error("count must satisfy {count} ∈ (0, {max}], please change it to avoid flooding the chat")]
    CountOutOfRange {
        /// the requested count
        count: i64,
        /// the configured maximum
        max: usize,
    },

    /// the requested page does not exist
    #[error("only {pages} page(s) of posts were found for these tags, lower the page or change the tags")]
    PageOutOfRange {
        /// the requested page (1-based)
        page: i64,
        /// how many pages exist
        pages: usize,
    },

    /// the requested page number is below 1
    #[error("page must be at least 1 (got {0})")]
    InvalidPage(i64),

    /// a constant tag is already present
    #[error("the constant tag {0} already exists")]
    TagExists(String),

    /// a constant tag is not present
    #[error("the constant tag {0} does not exist")]
    TagMissing(String),

    /// a rating argument was not recognized
    #[error("invalid rating: {0} (expected one of s, q, e, all)")]
    InvalidRating(String),

    /// a chat command could not be parsed
    #[error("{0}")]
    InvalidCommand(String),

    /// an IO error
    #[error("i/o error: {0}")]
    IO(#[from] std::io::Error),

    /// a reqwest error
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// a json error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// a toml serialization error
    #[error("toml serialization error: {0}")]
    TOMLSer(#[from] toml::ser::Error),

    /// a config error
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    /// an url parse error
    #[error("error parsing url: {0}")]
    ParseUrl(#[from] url::ParseError),

    /// a report from color_eyre
    #[error("{0}")]
    EyreReport(color_eyre::Report),

    /// a custom error
    #[error("error: {0}")]
    Other(String),
}

impl FinderError {
    /// whether this error is an expected outcome of a user request rather than a fault
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Network
                | Self::NoPostData
                | Self::NoPostFound
                | Self::BadStatus(_)
                | Self::CountOutOfRange { .. }
                | Self::PageOutOfRange { .. }
                | Self::InvalidPage(_)
                | Self::TagExists(_)
                | Self::TagMissing(_)
                | Self::InvalidRating(_)
                | Self::InvalidCommand(_)
        )
    }
}

impl From<String> for FinderError {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

impl From<color_eyre::Report> for FinderError {
    fn from(value: color_eyre::Report) -> Self {
        Self::EyreReport(value)
    }
}

/// A result using [`FinderError`] as the `Err` variant
pub type Result<T, U = FinderError> = std::result::Result<T, U>;

/// bail
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::FinderError::from(String::from($msg)))
    };

    ($err:expr $(,)?) => {
        return Err($crate::error::FinderError::from($err))
    };

    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::FinderError::from(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject_count(count: i64) -> Result<()> {
        if count < 1 {
            bail!(FinderError::CountOutOfRange { count, max: 5 });
        }

        bail!("count {} accepted", count)
    }

    #[test]
    fn test_count_message_echoes_constraint() {
        let err = reject_count(0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "count must satisfy 0 ∈ (0, 5], please change it to avoid flooding the chat"
        );
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_bail_formats_other() {
        let err = reject_count(3).unwrap_err();
        assert_eq!(err.to_string(), "error: count 3 accepted");
        assert!(!err.is_user_facing());
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while crawling categories and exporting products
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No WebDriver endpoint accepted a new session
    #[error("failed to connect to WebDriver at {url}: {message}")]
    Connect { url: String, message: String },

    /// The browser could not load a category page
    #[error("failed to navigate to {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: fantoccini::error::CmdError,
    },

    /// Any other WebDriver command failure
    #[error("browser command failed: {0}")]
    Browser(#[from] fantoccini::error::CmdError),

    /// A product card lacks a sub-element the extractor relies on
    #[error("product card {card} is missing its {field} element")]
    MissingField { card: usize, field: &'static str },

    /// A raw record lacks one of the fixed product keys
    #[error("raw record is missing key `{0}`")]
    MissingKey(&'static str),

    /// A raw record value cannot be parsed into its typed column
    #[error("invalid {field} value {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// The page adapter cannot perform the requested action
    #[error("unsupported page action: {0}")]
    Unsupported(&'static str),

    /// Reading or writing an exported file failed
    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

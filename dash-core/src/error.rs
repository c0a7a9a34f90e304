/// Error types for the dashboard page
use thiserror::Error;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum Error {
    /// A range whose lower bound lies after its upper bound
    #[error("Invalid date range: {from} is after {to}")]
    InvertedRange { from: String, to: String },

    /// The page markup has no container for a widget
    #[error("No container found for slot: {0}")]
    MissingSlot(String),

    /// `render` was called on a page that is already mounted
    #[error("Page is already rendered")]
    AlreadyRendered,

    /// `destroy` was called on a page that was never rendered
    #[error("Page has not been rendered")]
    NotRendered,

    /// The page was destroyed and cannot be used again
    #[error("Page has been destroyed")]
    Destroyed,

    /// A DOM or widget operation failed in the host environment
    #[error("Host operation failed: {0}")]
    Host(String),

    /// Failed to build an endpoint URL
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to parse page configuration
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Type alias for Results using the dashboard Error
pub type Result<T> = std::result::Result<T, Error>;

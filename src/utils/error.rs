use crate::domain::model::{RosterRef, TeamId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OncallError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for `{field}`: `{value}` ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    /// Transport or service failure while querying one roster. Distinct from
    /// the off-duty outcome, which is a valid answer and not an error.
    #[error("roster query failed for `{roster}`: {source}")]
    RosterQueryError {
        roster: RosterRef,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A resolution aborted by a failed roster query. Partial answers are
    /// never produced; one failed query fails the whole lookup.
    #[error("could not resolve on-call roster for `{team}`: {source}")]
    ResolutionError {
        team: TeamId,
        #[source]
        source: Box<OncallError>,
    },
}

pub type Result<T> = std::result::Result<T, OncallError>;

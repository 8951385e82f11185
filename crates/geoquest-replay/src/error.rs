//! Error types for the replay binary.
//!
//! [`ReplayError`] wraps every failure mode between reading the scenario
//! file and printing the report. Events the session rejects are not errors;
//! they are logged and listed in the report.

/// Top-level error for the replay binary.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The command line was malformed.
    #[error("usage: geoquest-replay <scenario.json>")]
    Usage,

    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: geoquest_engine::ConfigError,
    },

    /// The scenario's task records could not be normalized.
    #[error("task load error: {source}")]
    Load {
        /// The underlying load error.
        #[from]
        source: geoquest_engine::LoadError,
    },

    /// The scenario's persisted score entries are inconsistent.
    #[error("score ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: geoquest_ledger::LedgerError,
    },

    /// Reading the scenario file failed.
    #[error("failed to read scenario: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The scenario file or report was not valid JSON.
    #[error("scenario JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

use thiserror::Error;

/// Library-level errors using thiserror for structured error handling.
///
/// Routine playback conditions (unknown preset name, disabled sound effects,
/// uninitialized manager) are logged and skipped rather than surfaced as
/// errors; the types here cover construction and I/O failures only.

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to decode clip '{label}'")]
    DecodeFailed {
        label: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Playback failed for clip '{label}'")]
    PlaybackFailed {
        label: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to scan preset directory {path}")]
    ScanFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preset file {path}")]
    ParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to load clip file {path}")]
    ClipLoadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid preset '{name}': {reason}")]
    InvalidPreset { name: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

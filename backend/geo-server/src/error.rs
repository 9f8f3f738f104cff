use thiserror::Error;

/// Startup failures; anything here ends the process
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] geo_config::ConfigError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Failed to install metrics recorder: {message}")]
    MetricsRecorder { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;

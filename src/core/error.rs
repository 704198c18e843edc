use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoostError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Catalog syntax error at byte {offset}: {message}")]
    SyntaxError { offset: usize, message: String },

    #[error("Record decode error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to replace catalog file: {0}")]
    PersistError(#[from] tempfile::PersistError),
}

impl BoostError {
    /// Shift the offset of a syntax error found inside a sub-slice
    pub fn offset_by(self, base: usize) -> Self {
        match self {
            BoostError::SyntaxError { offset, message } => BoostError::SyntaxError {
                offset: offset + base,
                message,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, BoostError>;

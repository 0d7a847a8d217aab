use thiserror::Error;

#[derive(Error,Debug)]
pub enum Error {
    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("Could not read config file")]
    ConfigError(#[from] toml::de::Error),

    #[error("Could not start logging")]
    LoggingError(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Named signal '{0:}' not found")]
    NotFound(String),

    #[error("Value '{value:}' can not be decoded: {reason:}")]
    Format {
        value: String,
        reason: String,
    },

    #[error("Bit width {0:} is not supported, expected 1 to 64 bits")]
    InvalidWidth(u32),

    #[error("No signal with handle {0:}")]
    UnknownHandle(usize),

    #[error("Unknown file format of '{0:}'")]
    UnknownFileFormat(String),

    #[error("Missing argument {0:}: {1:}")]
    MissingArgument(String, String),

    #[error("Single signal mode takes one signal, got {0:}")]
    TooManySignals(usize),
}

impl Error {
    pub(crate) fn format(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LcmError {
    #[error("Malformed input at line {line}: {message}")]
    MalformedInput { line: usize, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LcmError>;

impl LcmError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput { line, message: message.into() }
    }
}

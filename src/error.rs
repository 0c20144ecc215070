use miette::Diagnostic;
use thiserror::Error;

/// Main error type for spriteswap operations
#[derive(Error, Diagnostic, Debug)]
pub enum SwapError {
    #[error("IO error: {0}")]
    #[diagnostic(code(spriteswap::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(spriteswap::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(spriteswap::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid pixel buffer: {message}")]
    #[diagnostic(code(spriteswap::buffer))]
    Buffer {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(spriteswap::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{message}")]
    #[diagnostic(code(spriteswap::session))]
    Session {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, SwapError>;

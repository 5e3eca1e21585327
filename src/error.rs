use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} not a supported unit")]
    UnsupportedUnit(String),

    #[error("{0} is not a valid time between measurements")]
    InvalidInterval(f64),

    #[error("{0} is not a valid log level")]
    InvalidLogLevel(String),

    #[error("no command given")]
    EmptyCommand,

    #[error("unable to start `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("process monitoring is not supported on this platform")]
    Unsupported,

    #[error("sampling failed: {0}")]
    Sampling(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Configuration problems are caught before launch and exit with 2,
    /// everything else is a runtime failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnsupportedUnit(_)
            | Error::InvalidInterval(_)
            | Error::InvalidLogLevel(_)
            | Error::EmptyCommand => 2,
            _ => 1,
        }
    }

    pub fn is_config(&self) -> bool {
        self.exit_code() == 2
    }
}

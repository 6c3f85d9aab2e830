use thiserror::Error;

pub type SmResult<T> = Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Symbol count {0} does not fit the row index type")]
    RowCountOverflow(usize),
    #[error("Column {0} is out of range")]
    UnknownColumn(usize),
    #[error("Section not found: {0}")]
    UnknownSection(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid row: {0}")]
    InvalidRow(String),
    #[error("No symbol source is installed")]
    NoSource,
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Insufficient arguments")]
    InsufficientArguments,
    #[error("Too many arguments")]
    TooManyArguments,
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Ron(#[from] ron::error::SpannedError),
    #[cfg(feature = "serde")]
    #[error(transparent)]
    RonSer(#[from] ron::Error),
    #[cfg(feature = "elf")]
    #[error(transparent)]
    Goblin(#[from] goblin::error::Error),
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

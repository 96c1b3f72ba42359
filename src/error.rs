use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] postgres::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

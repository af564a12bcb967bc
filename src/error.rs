use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erreur SQLite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Date invalide: {0}")]
    DateInvalide(String),

    #[error("{0}")]
    Custom(String),
}

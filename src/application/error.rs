use thiserror::Error;

use crate::domain::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid entry: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    /// True when the error is caused by user input and can be fixed by the user.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

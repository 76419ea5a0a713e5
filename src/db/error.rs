#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Dataset query error: {0}")]
    SqlxError(#[from] sqlx::Error),
}

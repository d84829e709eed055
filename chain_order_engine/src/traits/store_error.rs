use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database driver error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Database migration error: {0}")]
    MigrationError(String),
    #[error("No confirmed chain transaction found for {0}")]
    ChainTxNotFound(String),
    #[error("An order for transaction {0} already exists")]
    OrderAlreadyExists(String),
    #[error("Wallet {0} is already registered")]
    WalletAlreadyExists(String),
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationError(e.to_string())
    }
}

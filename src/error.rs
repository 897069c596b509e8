use crate::domain::provider::PaymentProvider;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("payment not found: {0}")]
    PaymentNotFound(String),
    #[error("no adapter registered for provider: {0}")]
    ProviderNotFound(PaymentProvider),
    #[error("provider registered more than once: {0}")]
    DuplicateProvider(PaymentProvider),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("storage error: {0}")]
    RocksDb(#[from] rocksdb::Error),
    #[error("internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

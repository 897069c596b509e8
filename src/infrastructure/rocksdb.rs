use crate::domain::payment::Payment;
use crate::domain::ports::PaymentStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing payment records.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent store implementation using RocksDB.
///
/// Payments are stored as serde_json values keyed by their id in a dedicated
/// Column Family. This struct is thread-safe (`Clone` shares the underlying
/// `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbPaymentStore {
    db: Arc<DB>,
}

impl RocksDbPaymentStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the payments column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_PAYMENTS).ok_or_else(|| {
            PaymentError::Internal(Box::new(std::io::Error::other(
                "payments column family not found",
            )))
        })
    }
}

#[async_trait]
impl PaymentStore for RocksDbPaymentStore {
    async fn save(&self, payment: Payment) -> Result<()> {
        let cf = self.cf()?;
        let value = serde_json::to_vec(&payment).map_err(|e| {
            PaymentError::Internal(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("serialization error: {}", e),
            )))
        })?;

        self.db.put_cf(cf, payment.id().as_bytes(), value)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        let cf = self.cf()?;
        let result = self.db.get_cf(cf, id.as_bytes())?;

        if let Some(bytes) = result {
            let payment = serde_json::from_slice(&bytes).map_err(|e| {
                PaymentError::Internal(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("deserialization error: {}", e),
                )))
            })?;
            Ok(Some(payment))
        } else {
            Ok(None)
        }
    }

    async fn find_all(&self) -> Result<Vec<Payment>> {
        let cf = self.cf()?;

        let mut payments = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let payment: Payment = serde_json::from_slice(&value).map_err(|e| {
                PaymentError::Internal(Box::new(std::io::Error::other(format!(
                    "failed to deserialize payment: {}",
                    e
                ))))
            })?;
            payments.push(payment);
        }

        Ok(payments)
    }

    async fn delete(&self, payment: &Payment) -> Result<()> {
        let cf = self.cf()?;
        self.db.delete_cf(cf, payment.id().as_bytes())?;
        Ok(())
    }
}

use super::payment::Payment;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Persistence port for payment records.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn save(&self, payment: Payment) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>>;
    async fn find_all(&self) -> Result<Vec<Payment>>;
    async fn delete(&self, payment: &Payment) -> Result<()>;
}

/// Shared handle to a store implementation. `Arc` rather than `Box` so the
/// background dispatch task can keep the store alive past the caller.
pub type PaymentStoreHandle = Arc<dyn PaymentStore>;

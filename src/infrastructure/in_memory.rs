use crate::domain::payment::Payment;
use crate::domain::ports::PaymentStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payment records.
///
/// Uses `Arc<RwLock<HashMap<String, Payment>>>` to allow shared concurrent
/// access. Ideal for testing or single-run use where persistence is not
/// required.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<String, Payment>>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn save(&self, payment: Payment) -> Result<()> {
        let mut payments = self.payments.write().await;
        payments.insert(payment.id().to_string(), payment);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.values().cloned().collect())
    }

    async fn delete(&self, payment: &Payment) -> Result<()> {
        let mut payments = self.payments.write().await;
        payments.remove(payment.id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentRequest;
    use crate::domain::provider::PaymentProvider;
    use rust_decimal_macros::dec;

    fn payment() -> Payment {
        PaymentRequest {
            amount: dec!(100.0),
            currency: "TRY".to_string(),
            provider: Some(PaymentProvider::Param),
            description: None,
        }
        .into_payment()
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let store = InMemoryPaymentStore::new();
        let payment = payment();

        store.save(payment.clone()).await.unwrap();

        let found = store.find_by_id(payment.id()).await.unwrap().unwrap();
        assert_eq!(found, payment);

        assert!(store.find_by_id("missing-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_record() {
        let store = InMemoryPaymentStore::new();
        let mut payment = payment();

        store.save(payment.clone()).await.unwrap();
        payment
            .transition(crate::domain::payment::PaymentStatus::Processing)
            .unwrap();
        store.save(payment.clone()).await.unwrap();

        let found = store.find_by_id(payment.id()).await.unwrap().unwrap();
        assert_eq!(found.status(), crate::domain::payment::PaymentStatus::Processing);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = InMemoryPaymentStore::new();
        let payment = payment();

        store.save(payment.clone()).await.unwrap();
        store.delete(&payment).await.unwrap();

        assert!(store.find_by_id(payment.id()).await.unwrap().is_none());
        assert!(store.find_all().await.unwrap().is_empty());
    }
}

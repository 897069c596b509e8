use crate::application::dispatch::{self, ProcessingHandle};
use crate::application::registry::ProviderRegistry;
use crate::domain::payment::{Payment, PaymentRequest, PaymentStatus, PaymentUpdate};
use crate::domain::ports::PaymentStoreHandle;
use crate::error::{PaymentError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, warn};

/// Per-payment-id locks serializing load-modify-save sequences.
///
/// Two concurrent operations on the same payment would otherwise both pass
/// the transition check before either persisted its write.
#[derive(Clone, Default)]
struct PaymentLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl PaymentLocks {
    async fn acquire(&self, id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            Arc::clone(map.entry(id.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}

/// The main entry point for payment orchestration.
///
/// `PaymentEngine` owns the payment lifecycle: it validates every status
/// move against the transition table, resolves the provider adapter from the
/// registry, and commits resulting state through the store port. Cloning the
/// engine shares the underlying store, registry and locks.
#[derive(Clone)]
pub struct PaymentEngine {
    store: PaymentStoreHandle,
    registry: Arc<ProviderRegistry>,
    locks: PaymentLocks,
}

impl PaymentEngine {
    pub fn new(store: PaymentStoreHandle, registry: Arc<ProviderRegistry>) -> Self {
        Self {
            store,
            registry,
            locks: PaymentLocks::default(),
        }
    }

    /// Validates the request and persists a new PENDING payment.
    ///
    /// On any validation failure nothing reaches the store.
    pub async fn create(&self, request: PaymentRequest) -> Result<Payment> {
        let payment = request.into_payment()?;
        self.store.save(payment.clone()).await?;
        info!(payment_id = %payment.id(), provider = %payment.provider(), "payment created");
        Ok(payment)
    }

    pub async fn get(&self, id: &str) -> Result<Payment> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| PaymentError::PaymentNotFound(id.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Payment>> {
        self.store.find_all().await
    }

    /// Replaces amount, currency and description. Status and provider are
    /// never altered by this operation.
    pub async fn update(&self, id: &str, update: PaymentUpdate) -> Result<Payment> {
        let _guard = self.locks.acquire(id).await;
        let mut payment = self.get(id).await?;
        payment.apply_update(update)?;
        self.store.save(payment.clone()).await?;
        Ok(payment)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.locks.acquire(id).await;
        let payment = self.get(id).await?;
        self.store.delete(&payment).await
    }

    /// Charges the payment on the caller's task, blocking until the provider
    /// answers.
    ///
    /// The PROCESSING state is persisted before the provider call, so
    /// concurrent readers observe the payment as in-flight.
    pub async fn process(&self, id: &str) -> Result<Payment> {
        let _guard = self.locks.acquire(id).await;
        let mut payment = self.get(id).await?;
        payment.transition(PaymentStatus::Processing)?;
        self.store.save(payment.clone()).await?;

        let adapter = self.registry.resolve(payment.provider())?;
        let next = if adapter.charge(&payment).await {
            PaymentStatus::Completed
        } else {
            warn!(payment_id = %payment.id(), "charge rejected by provider");
            PaymentStatus::Failed
        };
        payment.transition(next)?;
        self.store.save(payment.clone()).await?;
        info!(payment_id = %payment.id(), status = %payment.status(), "payment processed");
        Ok(payment)
    }

    /// Same pre-checks and PROCESSING persist as [`process`](Self::process),
    /// then hands the charge to a background task and returns a handle
    /// immediately. A charge task that dies is folded into FAILED rather
    /// than surfaced through the handle.
    pub async fn process_async(&self, id: &str) -> Result<ProcessingHandle> {
        let guard = self.locks.acquire(id).await;
        let mut payment = self.get(id).await?;
        payment.transition(PaymentStatus::Processing)?;
        self.store.save(payment.clone()).await?;

        let adapter = self.registry.resolve(payment.provider())?;
        info!(payment_id = %payment.id(), "payment dispatched for background processing");
        Ok(dispatch::charge_in_background(
            Arc::clone(&self.store),
            adapter,
            payment,
            guard,
        ))
    }

    /// Refunds a COMPLETED payment. A refund the provider rejects leaves the
    /// record untouched and is reported as a validation error.
    pub async fn refund(&self, id: &str) -> Result<Payment> {
        let _guard = self.locks.acquire(id).await;
        let mut payment = self.get(id).await?;
        if payment.status() != PaymentStatus::Completed {
            return Err(PaymentError::Validation(format!(
                "only payments in status COMPLETED can be refunded, current status is {}",
                payment.status()
            )));
        }

        let adapter = self.registry.resolve(payment.provider())?;
        if !adapter.refund(&payment).await {
            warn!(payment_id = %payment.id(), "refund rejected by provider");
            return Err(PaymentError::Validation(format!(
                "refund of payment {} was rejected by the provider",
                payment.id()
            )));
        }
        payment.transition(PaymentStatus::Refunded)?;
        self.store.save(payment.clone()).await?;
        info!(payment_id = %payment.id(), "payment refunded");
        Ok(payment)
    }

    /// External-result setter used by the webhook collaborator.
    pub async fn complete(&self, id: &str) -> Result<Payment> {
        self.settle(id, PaymentStatus::Completed).await
    }

    /// External-result setter used by the webhook collaborator.
    pub async fn fail(&self, id: &str) -> Result<Payment> {
        self.settle(id, PaymentStatus::Failed).await
    }

    async fn settle(&self, id: &str, status: PaymentStatus) -> Result<Payment> {
        let _guard = self.locks.acquire(id).await;
        let mut payment = self.get(id).await?;
        payment.transition(status)?;
        self.store.save(payment.clone()).await?;
        info!(payment_id = %payment.id(), status = %payment.status(), "payment settled externally");
        Ok(payment)
    }
}

use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::PaymentStoreHandle;
use crate::domain::provider::ProviderAdapterHandle;
use crate::error::{PaymentError, Result};
use tokio::sync::{OwnedMutexGuard, oneshot};
use tracing::error;

/// Handle to a payment being charged in the background.
///
/// Resolved exactly once: either the charge finishes normally and the
/// COMPLETED/FAILED mapping is applied, or the charge task itself dies and
/// the payment is forced to FAILED. The handle never observes a payment
/// still in PROCESSING.
#[derive(Debug)]
pub struct ProcessingHandle {
    rx: oneshot::Receiver<Payment>,
}

impl ProcessingHandle {
    /// Waits for the background charge to settle the payment.
    pub async fn wait(self) -> Result<Payment> {
        self.rx.await.map_err(|_| {
            PaymentError::Internal(Box::new(std::io::Error::other(
                "background processing task dropped without a result",
            )))
        })
    }
}

/// Runs the provider charge off the caller's path.
///
/// The payment must already be persisted as PROCESSING and `guard` must be
/// its per-payment lock; the guard travels into the task and is released
/// only after the terminal state is persisted, so no competing operation can
/// interleave with the settle.
pub(crate) fn charge_in_background(
    store: PaymentStoreHandle,
    adapter: ProviderAdapterHandle,
    payment: Payment,
    guard: OwnedMutexGuard<()>,
) -> ProcessingHandle {
    let (done, rx) = oneshot::channel();

    tokio::spawn(async move {
        let _guard = guard;

        // The charge runs on its own task so a panic inside the adapter
        // surfaces here as a JoinError instead of killing the continuation.
        let charge = {
            let snapshot = payment.clone();
            tokio::spawn(async move { adapter.charge(&snapshot).await })
        };

        let next = match charge.await {
            Ok(true) => PaymentStatus::Completed,
            Ok(false) => PaymentStatus::Failed,
            Err(cause) => {
                error!(payment_id = %payment.id(), %cause, "charge task aborted, marking payment failed");
                PaymentStatus::Failed
            }
        };

        let mut payment = payment;
        if let Err(cause) = payment.transition(next) {
            // Unreachable while the guard is held: PROCESSING reaches both
            // terminal targets.
            error!(payment_id = %payment.id(), %cause, "refusing terminal transition");
            return;
        }
        if let Err(cause) = store.save(payment.clone()).await {
            error!(payment_id = %payment.id(), %cause, "failed to persist settled payment");
            return;
        }
        let _ = done.send(payment);
    });

    ProcessingHandle { rx }
}

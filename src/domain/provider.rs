use crate::domain::payment::Payment;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of an external payment network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentProvider {
    Param,
    Papara,
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentProvider::Param => "PARAM",
            PaymentProvider::Papara => "PAPARA",
        })
    }
}

/// Executes charges and refunds against one external payment network.
///
/// Outcomes are boolean-only; transaction ids, error codes and other
/// provider-side detail stay behind the adapter.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// The identifier this adapter serves. Declared by the adapter itself so
    /// the registry never has to guess from type names.
    fn provider(&self) -> PaymentProvider;

    async fn charge(&self, payment: &Payment) -> bool;

    async fn refund(&self, payment: &Payment) -> bool;
}

/// Shared handle to an adapter, cloneable into background tasks.
pub type ProviderAdapterHandle = Arc<dyn ProviderAdapter>;

use crate::domain::provider::{PaymentProvider, ProviderAdapterHandle};
use crate::error::{PaymentError, Result};
use std::collections::HashMap;
use tracing::info;

/// Immutable mapping from provider identifier to adapter instance.
///
/// Built once at startup from the full set of available adapters. Lookups
/// after construction are read-only, so the registry can be shared across
/// tasks without locking.
pub struct ProviderRegistry {
    adapters: HashMap<PaymentProvider, ProviderAdapterHandle>,
}

impl ProviderRegistry {
    /// Builds the registry. Each adapter declares its own identifier; two
    /// adapters claiming the same identifier is a construction error, not a
    /// silent overwrite.
    pub fn new(adapters: Vec<ProviderAdapterHandle>) -> Result<Self> {
        let mut map = HashMap::new();
        for adapter in adapters {
            let provider = adapter.provider();
            if map.insert(provider, adapter).is_some() {
                return Err(PaymentError::DuplicateProvider(provider));
            }
            info!(%provider, "payment provider registered");
        }
        Ok(Self { adapters: map })
    }

    pub fn resolve(&self, provider: PaymentProvider) -> Result<ProviderAdapterHandle> {
        self.adapters
            .get(&provider)
            .cloned()
            .ok_or(PaymentError::ProviderNotFound(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Payment;
    use crate::domain::provider::ProviderAdapter;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubAdapter(PaymentProvider);

    #[async_trait]
    impl ProviderAdapter for StubAdapter {
        fn provider(&self) -> PaymentProvider {
            self.0
        }

        async fn charge(&self, _payment: &Payment) -> bool {
            true
        }

        async fn refund(&self, _payment: &Payment) -> bool {
            true
        }
    }

    #[test]
    fn test_resolve_registered_adapter() {
        let registry =
            ProviderRegistry::new(vec![Arc::new(StubAdapter(PaymentProvider::Param))]).unwrap();

        let adapter = registry.resolve(PaymentProvider::Param).unwrap();
        assert_eq!(adapter.provider(), PaymentProvider::Param);
    }

    #[test]
    fn test_resolve_unregistered_adapter_fails() {
        let registry =
            ProviderRegistry::new(vec![Arc::new(StubAdapter(PaymentProvider::Param))]).unwrap();

        assert!(matches!(
            registry.resolve(PaymentProvider::Papara),
            Err(PaymentError::ProviderNotFound(PaymentProvider::Papara))
        ));
    }

    #[test]
    fn test_duplicate_registration_fails_construction() {
        let result = ProviderRegistry::new(vec![
            Arc::new(StubAdapter(PaymentProvider::Param)),
            Arc::new(StubAdapter(PaymentProvider::Param)),
        ]);

        assert!(matches!(
            result,
            Err(PaymentError::DuplicateProvider(PaymentProvider::Param))
        ));
    }

    #[test]
    fn test_empty_registry_is_valid_but_resolves_nothing() {
        let registry = ProviderRegistry::new(Vec::new()).unwrap();
        assert!(registry.resolve(PaymentProvider::Param).is_err());
    }
}

//! Application layer containing the orchestration core.
//!
//! This module defines the `PaymentEngine` which drives every payment through
//! its lifecycle, the `ProviderRegistry` it resolves adapters from, and the
//! dispatch wrapper that runs provider charges off the caller's path.

pub mod dispatch;
pub mod engine;
pub mod registry;

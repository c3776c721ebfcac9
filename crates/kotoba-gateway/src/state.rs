//! Gateway application state.
//!
//! Requests share no mutable state; this only carries the provider handle and
//! read-only configuration to the handlers.

use std::sync::Arc;

use kotoba_provider::{Invoker, TextGenerator};

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayState {
    /// Issues provider calls.
    pub invoker: Invoker,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl GatewayState {
    /// Create a new gateway state.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, config: GatewayConfig) -> Self {
        Self {
            invoker: Invoker::new(generator),
            config,
        }
    }
}

//! Rotation plus streaming behind one call.

use std::sync::Arc;

use sobserve::{SafeRotationHooks, SafeStreamHooks, TracingObservabilityHooks};
use sprovider::{ChatProvider, DeltaSink, HttpTransport, MessageInput, ProviderStreamHooks};
use srotator::{CounterStore, FileCounterStore, RotationHooks, Rotator};

use crate::providers::{build_providers, default_transport};
use crate::{GatewayConfig, GatewayError};

/// Picks the next provider from a shared rotation and streams through it.
///
/// A failed call is returned as is; whether to try another provider is left
/// to the caller.
pub struct Gateway {
    rotator: Rotator<Arc<dyn ChatProvider>>,
}

impl Gateway {
    pub fn new(
        providers: Vec<Arc<dyn ChatProvider>>,
        store: impl CounterStore + 'static,
    ) -> Result<Self, GatewayError> {
        Ok(Self {
            rotator: Rotator::new(providers, store)?,
        })
    }

    pub fn from_rotator(rotator: Rotator<Arc<dyn ChatProvider>>) -> Self {
        Self { rotator }
    }

    /// Reqwest-backed gateway with tracing hooks on streams and rotation.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let hooks: Arc<dyn ProviderStreamHooks> =
            Arc::new(SafeStreamHooks::new(TracingObservabilityHooks));
        let gateway = Self::from_config_with(config, default_transport()?, hooks)?;

        Ok(gateway.with_rotation_hooks(Arc::new(SafeRotationHooks::new(
            TracingObservabilityHooks,
        ))))
    }

    pub fn from_config_with(
        config: &GatewayConfig,
        transport: Arc<dyn HttpTransport>,
        hooks: Arc<dyn ProviderStreamHooks>,
    ) -> Result<Self, GatewayError> {
        let providers = build_providers(config, transport, hooks);
        Self::new(providers, FileCounterStore::new(&config.state_file))
    }

    pub fn with_rotation_hooks(self, hooks: Arc<dyn RotationHooks>) -> Self {
        Self {
            rotator: self.rotator.with_hooks(hooks),
        }
    }

    pub fn providers(&self) -> &[Arc<dyn ChatProvider>] {
        self.rotator.items()
    }

    /// Advances the shared rotation. Blocks while another process holds the
    /// state lock.
    pub fn next_provider(&self) -> Result<Arc<dyn ChatProvider>, GatewayError> {
        Ok(self.rotator.next()?.clone())
    }

    /// Streams through the next provider and returns its name.
    ///
    /// Rotation runs inline, so the calling worker thread blocks while
    /// another process holds the state lock. Callers that cannot afford that
    /// pick the provider with [`Gateway::next_provider`] on a blocking thread
    /// and stream with [`Gateway::stream_through`].
    pub async fn stream_next(
        &self,
        messages: Vec<MessageInput>,
        on_delta: DeltaSink<'_>,
    ) -> Result<&str, GatewayError> {
        let provider = self.rotator.next()?;
        Self::stream_through(provider.as_ref(), messages, on_delta).await?;

        Ok(provider.name())
    }

    /// Streams through an already selected provider without touching the
    /// rotation.
    pub async fn stream_through(
        provider: &dyn ChatProvider,
        messages: Vec<MessageInput>,
        on_delta: DeltaSink<'_>,
    ) -> Result<(), GatewayError> {
        provider
            .stream(messages, on_delta)
            .await
            .map_err(|error| GatewayError::provider(provider.name(), error))
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self
            .providers()
            .iter()
            .map(|provider| provider.name())
            .collect::<Vec<_>>();

        f.debug_struct("Gateway")
            .field("providers", &names)
            .finish_non_exhaustive()
    }
}

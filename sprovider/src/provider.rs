use scommon::BoxFuture;

use crate::{MessageInput, ProviderError};

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

/// Receives each generated text fragment, in arrival order.
pub type DeltaSink<'a> = &'a mut (dyn FnMut(&str) + Send);

/// The capability every backend adapter exposes to callers.
///
/// `stream` calls `on_delta` zero or more times and then resolves. It never
/// retries and never times out on its own; dropping the future closes the
/// underlying connection.
pub trait ChatProvider: Send + Sync {
    /// Stable lowercase identifier such as `openai` or `groq`.
    fn name(&self) -> &str;

    fn stream<'a>(
        &'a self,
        messages: Vec<MessageInput>,
        on_delta: DeltaSink<'a>,
    ) -> ProviderFuture<'a, Result<(), ProviderError>>;
}

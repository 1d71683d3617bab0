#[cfg(any(feature = "provider-groq", feature = "provider-cerebras"))]
pub mod chat_completions;

#[cfg(feature = "provider-groq")]
pub mod groq;

#[cfg(feature = "provider-cerebras")]
pub mod cerebras;

#[cfg(feature = "provider-openai")]
pub mod openai;

//! Shared primitives for the switchyard workspace crates.
//!
//! ```rust
//! use scommon::GenerationOptions;
//!
//! let options = GenerationOptions::new(0.6, 4096, 1.0).with_temperature(0.3);
//! assert_eq!(options.temperature, 0.3);
//! assert!(options.validate().is_ok());
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use scommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod model {
    //! Generation settings shared by every backend adapter.
    //!
    //! ```rust
    //! use scommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default()
    //!     .with_temperature(0.2)
    //!     .with_max_tokens(128)
    //!     .with_top_p(0.9);
    //!
    //! assert_eq!(options.temperature, 0.2);
    //! assert_eq!(options.max_tokens, 128);
    //! assert_eq!(options.top_p, 0.9);
    //! ```

    /// Sampling parameters sent with every request.
    ///
    /// Each backend maps `max_tokens` onto its own field name.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GenerationOptions {
        pub temperature: f32,
        pub max_tokens: u32,
        pub top_p: f32,
    }

    impl Default for GenerationOptions {
        fn default() -> Self {
            Self {
                temperature: 1.0,
                max_tokens: 4096,
                top_p: 1.0,
            }
        }
    }

    impl GenerationOptions {
        pub fn new(temperature: f32, max_tokens: u32, top_p: f32) -> Self {
            Self {
                temperature,
                max_tokens,
                top_p,
            }
        }

        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = temperature;
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = max_tokens;
            self
        }

        pub fn with_top_p(mut self, top_p: f32) -> Self {
            self.top_p = top_p;
            self
        }

        pub fn validate(&self) -> Result<(), &'static str> {
            if !(0.0..=2.0).contains(&self.temperature) {
                return Err("temperature must be in the inclusive range 0.0..=2.0");
            }

            if self.max_tokens == 0 {
                return Err("max_tokens must be greater than zero");
            }

            if !(0.0..=1.0).contains(&self.top_p) {
                return Err("top_p must be in the inclusive range 0.0..=1.0");
            }

            Ok(())
        }
    }
}

pub use future::BoxFuture;
pub use model::GenerationOptions;

//! Generative AI provider clients for the kotoba gateway.
//!
//! This crate is the gateway's only path to the model. It handles:
//!
//! - Rendering translation and vocabulary prompts
//! - Calling a [`TextGenerator`] (Gemini over HTTP, or a no-op stand-in)
//! - Classifying provider failures, rate limits first
//! - Checking that vocabulary output has the expected shape
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use kotoba_core::TranslationRequest;
//! use kotoba_provider::{GeminiClient, GeminiConfig, Invoker};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(GeminiConfig::new(std::env::var("GEMINI_API_KEY")?));
//! let invoker = Invoker::new(Arc::new(client));
//!
//! let request = TranslationRequest::new("good morning", "en", "ja");
//! let response = invoker.translate(&request).await?;
//! println!("{}", response.translated_text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod gemini;
pub mod generator;
pub mod invoker;
pub mod parse;
pub mod prompts;

pub use error::{classify_message, ProviderError, Result};
pub use gemini::{GeminiClient, GeminiConfig};
pub use generator::{GenerationParams, NoopGenerator, Prompt, TextGenerator};
pub use invoker::Invoker;

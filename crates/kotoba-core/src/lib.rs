//! Request model and validation for the kotoba AI gateway.
//!
//! This crate provides the transport-independent pieces of the gateway:
//!
//! - **Requests**: typed, bounds-checked translation and vocabulary requests
//! - **Responses**: the payloads returned to clients, including vocabulary entries
//! - **Validation**: turning an untyped JSON payload into a typed request, or a
//!   list of every violated constraint
//!
//! Nothing in here performs I/O. Every value lives for exactly one request.
//!
//! # Example
//!
//! ```
//! use kotoba_core::{validate_translation, validate_vocabulary, RequestLimits};
//! use serde_json::json;
//!
//! let request = validate_translation(json!({
//!     "text": "hello",
//!     "sourceLang": "en",
//!     "targetLang": "ja",
//! }))
//! .unwrap();
//! assert_eq!(request.target_lang, "ja");
//!
//! let vocab = validate_vocabulary(json!({ "level": "N4" }), &RequestLimits::default()).unwrap();
//! assert_eq!(vocab.count, 6);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod request;
pub mod response;
pub mod validation;

pub use error::{Result, ValidationError, Violation};
pub use request::{RequestLimits, TranslationRequest, VocabularyRequest, DEFAULT_VOCABULARY_COUNT};
pub use response::{TranslationResponse, VocabularyItem, VocabularyResponse};
pub use validation::{validate_translation, validate_vocabulary};

//! HTTP gateway for kotoba translation and vocabulary generation.
//!
//! This crate provides the public-facing API for the kotoba learning app.
//! It handles:
//!
//! - Request validation with a per-field violation list
//! - Forwarding prompts to the configured text-generation provider
//! - Deadline enforcement for provider calls
//! - Mapping provider failures onto client-facing error responses
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Clients                              │
//! │                    (HTTP / JSON)                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      kotoba-gateway                         │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐    │
//! │  │ Validation  │ │   Router    │ │   Deadline guard    │    │
//! │  │ (core)      │ │ + Handlers  │ │   + error mapping   │    │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                     ┌──────────────────┐
//!                     │ kotoba-provider  │
//!                     │ (Gemini / noop)  │
//!                     └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use kotoba_gateway::{create_router, GatewayConfig, GatewayState};
//! use kotoba_provider::NoopGenerator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::from_env()?;
//! let listen_addr = config.listen_addr.clone();
//! let state = GatewayState::new(Arc::new(NoopGenerator::new()), config);
//!
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod routes;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, GatewayConfig, ProviderSettings};
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;

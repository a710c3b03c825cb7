//! OpenRouter API client for chat completions
//!
//! One request, one response: the client posts to `/chat/completions` with
//! bearer auth and a client-side timeout and hands back the raw JSON body.
//! Interpreting that body is left to the caller.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ClientConfig, OpenRouterClient, DEFAULT_BASE_URL};
pub use error::{OpenRouterError, OpenRouterResult};
pub use types::*;

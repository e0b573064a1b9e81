//! Unified chat streaming types and transport.
//!
//! This crate provides the shared types used across all chat providers:
//! `ChatMessage`, `StreamRequest`, `StreamChunk` and the `Llm` trait. Also
//! provides the incremental wire decoders (`LineBuffer`, `SseDecoder`) and
//! `HttpProvider`, the HTTP transport every vendor adapter streams through.

pub use error::{Error, Result};
#[cfg(feature = "http")]
pub use http::HttpProvider;
pub use message::{ChatMessage, Role};
pub use provider::Llm;
#[cfg(feature = "http")]
pub use reqwest::{self, Client};
pub use request::StreamRequest;
pub use stream::{Frame, StreamChunk};
pub use wire::{LineBuffer, SseDecoder, SseEvent, Wire};

mod error;
#[cfg(feature = "http")]
mod http;
mod message;
mod provider;
mod request;
mod stream;
mod wire;

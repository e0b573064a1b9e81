//! Provider abstractions for the unified chat interface

use crate::{Result, StreamChunk, StreamRequest};
use futures_core::Stream;

/// A trait for chat providers.
///
/// Implementations translate a [`StreamRequest`] into the vendor's wire
/// protocol and yield [`StreamChunk`]s in vendor emission order.
pub trait Llm: Clone {
    /// Stream the assistant reply for `request`.
    fn stream(&self, request: StreamRequest) -> impl Stream<Item = Result<StreamChunk>> + Send + 'static;
}

//! Shared HTTP transport for chat providers.
//!
//! `HttpProvider` wraps a `reqwest::Client` with pre-configured headers and
//! endpoint URL. Every vendor adapter streams through [`HttpProvider::stream`],
//! supplying only its wire format and a per-payload parser.

use crate::{Error, Frame, Result, StreamChunk, Wire};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client, Method,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;

/// Shared HTTP transport for vendor adapters.
///
/// Holds a `reqwest::Client`, pre-built headers (auth + content-type),
/// and the target endpoint URL.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider with Bearer token authentication.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        let mut provider = Self::no_auth(client, endpoint);
        provider
            .headers
            .insert(header::AUTHORIZATION, header_value(&format!("Bearer {key}"))?);
        Ok(provider)
    }

    /// Create a provider without authentication (e.g. a local Ollama).
    pub fn no_auth(client: Client, endpoint: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        }
    }

    /// Create a provider with a custom header for authentication.
    ///
    /// Used by vendors that don't use Bearer tokens (e.g. Anthropic
    /// uses `x-api-key`, Gemini uses `x-goog-api-key`).
    pub fn custom_header(
        client: Client,
        header_name: &str,
        header_value_str: &str,
        endpoint: &str,
    ) -> Result<Self> {
        let mut provider = Self::no_auth(client, endpoint);
        provider.insert_header(header_name, header_value_str)?;
        Ok(provider)
    }

    /// Add or replace a static header.
    pub fn insert_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = name
            .parse::<HeaderName>()
            .map_err(|e| Error::InvalidHeader(format!("{name}: {e}")))?;
        self.headers.insert(name, header_value(value)?);
        Ok(())
    }

    /// Stream a response from the configured endpoint.
    pub fn stream<B: Serialize>(
        &self,
        body: &B,
        wire: Wire,
        parse: fn(&str) -> Frame,
    ) -> impl Stream<Item = Result<StreamChunk>> + Send + 'static + use<B> {
        self.stream_at(&self.endpoint, body, wire, parse)
    }

    /// Stream a response from `endpoint`.
    ///
    /// A non-success status is logged together with the body and ends the
    /// stream without yielding anything. Every decoded payload goes through
    /// `parse`; payloads with no text are skipped and the first `done` frame
    /// ends the stream. Transport failures are yielded as errors.
    ///
    /// The response body lives inside the returned stream, so dropping the
    /// stream early releases the connection.
    pub fn stream_at<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
        wire: Wire,
        parse: fn(&str) -> Frame,
    ) -> impl Stream<Item = Result<StreamChunk>> + Send + 'static + use<B> {
        let encoded = serde_json::to_vec(body);
        let request = self
            .client
            .request(Method::POST, endpoint)
            .headers(self.headers.clone());
        let endpoint = endpoint.to_owned();

        try_stream! {
            let encoded = encoded?;
            tracing::trace!("request: {}", String::from_utf8_lossy(&encoded));
            let response = request.body(encoded).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(%endpoint, status = status.as_u16(), %body, "received non-success status from vendor");
                return;
            }

            let mut decoder = wire.decoder();
            let mut bytes = response.bytes_stream();
            while let Some(next) = bytes.next().await {
                let next = next?;
                for payload in decoder.push(&next) {
                    let frame = parse(&payload);
                    let done = frame.done;
                    if let Some(chunk) = frame.into_chunk() {
                        yield chunk;
                    }
                    if done {
                        return;
                    }
                }
            }

            for payload in decoder.finish() {
                let frame = parse(&payload);
                let done = frame.done;
                if let Some(chunk) = frame.into_chunk() {
                    yield chunk;
                }
                if done {
                    return;
                }
            }
        }
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    let mut value = value
        .parse::<HeaderValue>()
        .map_err(|e| Error::InvalidHeader(e.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

//! Request body extraction that never rejects.
//!
//! Flavor payloads are taken as-is: an empty body, a non-JSON content type or
//! malformed JSON all fall back to `T::default()` instead of a 4xx.

use std::convert::Infallible;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = match Bytes::from_request(req, state).await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "unreadable request body; using defaults");
                return Ok(Self(T::default()));
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        match serde_json::from_slice(&bytes) {
            Ok(v) => Ok(Self(v)),
            Err(e) => {
                warn!(error = %e, "undecodable request body; using defaults");
                Ok(Self(T::default()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use service::FlavorInput;

    async fn extract(body: &'static str) -> FlavorInput {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap();
        let LenientJson(input) = LenientJson::<FlavorInput>::from_request(req, &()).await.unwrap();
        input
    }

    #[tokio::test]
    async fn decodes_without_content_type() {
        assert_eq!(extract(r#"{"flavor":"vanilla"}"#).await, FlavorInput::new("vanilla"));
    }

    #[tokio::test]
    async fn falls_back_on_garbage() {
        assert_eq!(extract("").await, FlavorInput::default());
        assert_eq!(extract("not json").await, FlavorInput::default());
        assert_eq!(extract(r#"{"flavor": 42}"#).await, FlavorInput::default());
    }
}

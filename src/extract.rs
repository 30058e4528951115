//! Request body extraction for the create endpoints.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::schemas::ApiError;

/// Request fields read from a JSON or form-urlencoded body.
///
/// A missing or empty body, or one of any other content type, yields
/// `T::default()` so the required-field checks report what is absent.
#[derive(Debug)]
pub struct Fields<T>(pub T);

#[derive(Debug, PartialEq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn of(headers: &HeaderMap) -> Self {
        let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
        else {
            return BodyKind::Other;
        };
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/json" => BodyKind::Json,
            "application/x-www-form-urlencoded" => BodyKind::Form,
            _ => BodyKind::Other,
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for Fields<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match BodyKind::of(req.headers()) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|err| ApiError::MalformedBody(err.body_text()))?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Fields(T::default()));
                }
                serde_json::from_slice(&bytes)
                    .map(Fields)
                    .map_err(|err| ApiError::MalformedBody(err.to_string()))
            }
            BodyKind::Form => Form::<T>::from_request(req, state)
                .await
                .map(|Form(fields)| Fields(fields))
                .map_err(|err| ApiError::MalformedBody(err.body_text())),
            BodyKind::Other => {
                debug!("No JSON or form body, treating request as empty");
                Ok(Fields(T::default()))
            }
        }
    }
}
